//! Gap classification for outcome attainment.
//!
//! The signed gap is `target - actual`: positive means under target,
//! negative means the target was exceeded. Tier boundaries are fixed
//! policy constants, not user-configurable.

use serde::{Deserialize, Serialize};

/// Largest gap still classified as `NearTarget`.
pub const NEAR_TARGET_MAX_GAP: f64 = 10.0;

/// Largest gap still classified as `NeedsImprovement`.
pub const NEEDS_IMPROVEMENT_MAX_GAP: f64 = 20.0;

/// Severity tier for an outcome's attainment gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GapTier {
    /// Target met or exceeded (gap <= 0).
    Met,
    /// Within 10 points of the target.
    NearTarget,
    /// 10 to 20 points under target.
    NeedsImprovement,
    /// More than 20 points under target.
    Critical,
}

impl GapTier {
    pub fn label(&self) -> &'static str {
        match self {
            GapTier::Met => "Met",
            GapTier::NearTarget => "Near Target",
            GapTier::NeedsImprovement => "Needs Improvement",
            GapTier::Critical => "Critical",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            GapTier::Met => "MET",
            GapTier::NearTarget => "NEAR",
            GapTier::NeedsImprovement => "IMPROVE",
            GapTier::Critical => "CRIT",
        }
    }
}

/// A classified (target, actual) pair for any outcome level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub target: f64,
    pub actual: f64,
    pub gap: f64,
    pub tier: GapTier,
}

/// Classify a signed gap into a severity tier. Operates on the raw
/// gap so a value just past a boundary lands in the next tier.
pub fn classify_gap(gap: f64) -> GapTier {
    if gap <= 0.0 {
        GapTier::Met
    } else if gap <= NEAR_TARGET_MAX_GAP {
        GapTier::NearTarget
    } else if gap <= NEEDS_IMPROVEMENT_MAX_GAP {
        GapTier::NeedsImprovement
    } else {
        GapTier::Critical
    }
}

/// Classify a (target, actual) pair.
pub fn analyze_gap(target: f64, actual: f64) -> GapAnalysis {
    let gap = target - actual;
    GapAnalysis {
        target,
        actual,
        gap,
        tier: classify_gap(gap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_boundaries() {
        assert_eq!(classify_gap(0.0), GapTier::Met);
        assert_eq!(classify_gap(10.0), GapTier::NearTarget);
        assert_eq!(classify_gap(10.0001), GapTier::NeedsImprovement);
        assert_eq!(classify_gap(20.0), GapTier::NeedsImprovement);
        assert_eq!(classify_gap(20.0001), GapTier::Critical);
    }

    #[test]
    fn exceeded_target_is_met() {
        let analysis = analyze_gap(70.0, 85.0);
        assert_eq!(analysis.gap, -15.0);
        assert_eq!(analysis.tier, GapTier::Met);
    }

    #[test]
    fn four_point_gap_is_near_target() {
        let analysis = analyze_gap(70.0, 66.0);
        assert_eq!(analysis.gap, 4.0);
        assert_eq!(analysis.tier, GapTier::NearTarget);
    }

    #[test]
    fn tiers_order_by_severity() {
        assert!(GapTier::Met < GapTier::NearTarget);
        assert!(GapTier::NearTarget < GapTier::NeedsImprovement);
        assert!(GapTier::NeedsImprovement < GapTier::Critical);
    }
}
