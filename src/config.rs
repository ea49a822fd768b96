//! Report assembly options.

use serde::{Deserialize, Serialize};

/// Options controlling which optional blocks a report carries.
///
/// These shape the documents only; they never change the statistics
/// themselves. Gap tier boundaries are policy constants in
/// `attainment::gap`, deliberately not configurable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Include per-student attainment detail in CLO reports.
    #[serde(default)]
    pub include_students: bool,

    /// Include the per-assessment-component breakdown in CLO reports.
    #[serde(default)]
    pub include_components: bool,

    /// Include the historical per-session trend series in PLO and
    /// program reports.
    #[serde(default)]
    pub include_trend: bool,

    /// Most recent improvement action plans kept in a program report.
    #[serde(default = "default_action_plan_limit")]
    pub action_plan_limit: usize,
}

fn default_action_plan_limit() -> usize {
    10
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_students: false,
            include_components: false,
            include_trend: false,
            action_plan_limit: default_action_plan_limit(),
        }
    }
}
