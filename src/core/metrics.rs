//! Statistics primitives used by every aggregation stage.
//!
//! Every function guards against empty input and returns `Option`
//! rather than a silent zero or `NaN`; division-by-zero guards are
//! mandatory throughout the engine.

/// Uniform rounding rule for attainment percentages and derived
/// statistics: half away from zero, two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` when fewer than two values.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() <= 1 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}
