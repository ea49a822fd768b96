//! CLO attainment statistics over per-student percentages.

use serde::{Deserialize, Serialize};

use crate::attainment::marks::StudentAttainment;
use crate::core::metrics::{self, round2};
use crate::core::{AttainmentStatus, CloId, CourseLearningOutcome};

/// Computed statistics for one CLO within one course offering.
///
/// Derived data, recomputed on demand. All statistics are `None` when
/// no student was assessed; `std_deviation` additionally needs at
/// least two students. `None` status means "no data", which callers
/// must never conflate with `NotAchieved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloAttainmentSummary {
    pub clo_id: CloId,
    pub code: String,
    pub description: String,
    pub target_attainment: f64,
    pub total_students: usize,
    pub students_achieved: usize,
    pub students_not_achieved: usize,
    pub average_attainment: Option<f64>,
    pub min_attainment: Option<f64>,
    pub max_attainment: Option<f64>,
    pub std_deviation: Option<f64>,
    pub attainment_status: Option<AttainmentStatus>,
}

/// Summarize one CLO from the percentages produced by the mark
/// aggregator.
pub fn summarize_clo(
    clo: &CourseLearningOutcome,
    students: &[StudentAttainment],
) -> CloAttainmentSummary {
    let percentages: Vec<f64> = students.iter().map(|s| s.percentage).collect();
    let total_students = percentages.len();
    let students_achieved = percentages
        .iter()
        .filter(|p| **p >= clo.target_attainment)
        .count();

    let average = metrics::mean(&percentages).map(round2);

    CloAttainmentSummary {
        clo_id: clo.id,
        code: clo.code.clone(),
        description: clo.description.clone(),
        target_attainment: clo.target_attainment,
        total_students,
        students_achieved,
        students_not_achieved: total_students - students_achieved,
        average_attainment: average,
        min_attainment: metrics::min_value(&percentages),
        max_attainment: metrics::max_value(&percentages),
        std_deviation: metrics::population_std_dev(&percentages).map(round2),
        attainment_status: average.map(|avg| AttainmentStatus::from_average(avg, clo.target_attainment)),
    }
}
