//! Report document shapes.
//!
//! Every report is a read-only snapshot stamped with a generation
//! timestamp. Re-requested with identical inputs, a document is
//! byte-for-byte reproducible except for `generated_at`: all child
//! collections are sorted by entity id or code.

pub mod assembler;

use chrono::{DateTime, NaiveDate, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::attainment::clo::CloAttainmentSummary;
use crate::attainment::gap::GapAnalysis;
use crate::attainment::rollup::PloAttainmentSummary;
use crate::core::metrics::{self, round2};
use crate::core::{
    AttainmentStatus, ComponentId, CourseId, DegreeId, GradeBand, OfferingId, PeoId, PlanId,
    PloId, SessionId, StudentId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    CloAttainment,
    PloAttainment,
    Course,
    Program,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::CloAttainment => "CLO Attainment Report",
            ReportType::PloAttainment => "PLO Attainment Report",
            ReportType::Course => "Course Report",
            ReportType::Program => "Program Report",
        }
    }
}

/// Outcome-level rollup counts shared by every report shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub total_outcomes: usize,
    pub outcomes_achieved: usize,
    pub outcomes_not_achieved: usize,
    pub outcomes_without_data: usize,
    /// Mean of the per-outcome averages, `None` if no outcome has data.
    pub mean_attainment: Option<f64>,
    /// Achieved outcomes over outcomes with data, as a percentage.
    pub success_rate: Option<f64>,
}

impl OverallStatistics {
    pub fn from_outcomes(outcomes: &[(Option<f64>, Option<AttainmentStatus>)]) -> Self {
        let total = outcomes.len();
        let achieved = outcomes
            .iter()
            .filter(|(_, s)| *s == Some(AttainmentStatus::Achieved))
            .count();
        let not_achieved = outcomes
            .iter()
            .filter(|(_, s)| *s == Some(AttainmentStatus::NotAchieved))
            .count();
        let with_data = achieved + not_achieved;
        let averages: Vec<f64> = outcomes.iter().filter_map(|(a, _)| *a).collect();

        OverallStatistics {
            total_outcomes: total,
            outcomes_achieved: achieved,
            outcomes_not_achieved: not_achieved,
            outcomes_without_data: total - with_data,
            mean_attainment: metrics::mean(&averages).map(round2),
            success_rate: if with_data > 0 {
                Some(round2(achieved as f64 / with_data as f64 * 100.0))
            } else {
                None
            },
        }
    }
}

/// Identity block for reports scoped to one course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingIdentity {
    pub offering_id: OfferingId,
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub section: String,
    pub session_id: SessionId,
    pub session_name: String,
}

/// Identity block for reports scoped to one degree program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeIdentity {
    pub degree_id: DegreeId,
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRef {
    pub session_id: SessionId,
    pub name: String,
}

/// A CLO's mapping onto a PLO, not yet rolled up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PloMappingRef {
    pub plo_id: PloId,
    pub plo_code: String,
    pub mapping_strength: f64,
}

/// Optional per-student detail row of a CLO report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentOutcome {
    pub student_id: StudentId,
    pub percentage: f64,
    pub achieved: bool,
}

/// Optional per-component breakdown row: one CLO's statistics
/// restricted to the questions of one assessment component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAttainment {
    pub component_id: ComponentId,
    pub component_name: String,
    pub total_students: usize,
    pub average_attainment: Option<f64>,
    pub min_attainment: Option<f64>,
    pub max_attainment: Option<f64>,
}

/// One CLO entry of a CLO or course report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloOutcomeEntry {
    pub summary: CloAttainmentSummary,
    /// `None` when the CLO has no data to measure a gap against.
    pub gap: Option<GapAnalysis>,
    pub plo_mappings: Vec<PloMappingRef>,
    pub components: Option<Vec<ComponentAttainment>>,
    pub students: Option<Vec<StudentOutcome>>,
}

/// Scope: one course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloReport {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub offering: OfferingIdentity,
    pub overall_statistics: OverallStatistics,
    pub outcomes: Vector<CloOutcomeEntry>,
}

/// One point of a PLO's historical trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub session_id: SessionId,
    pub session_name: String,
    pub average_attainment: Option<f64>,
}

/// One PLO entry of a PLO or program report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PloOutcomeEntry {
    pub summary: PloAttainmentSummary,
    pub gap: Option<GapAnalysis>,
    /// Chronological per-session attainment, when requested.
    pub trend: Option<Vec<TrendPoint>>,
}

/// Scope: one degree program, optional session filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PloReport {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub degree: DegreeIdentity,
    pub session_filter: Option<SessionRef>,
    pub overall_statistics: OverallStatistics,
    pub outcomes: Vector<PloOutcomeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentStatistics {
    pub total: usize,
    pub active: usize,
    pub dropped: usize,
    pub withdrawn: usize,
}

/// Whole-component summary over all of a component's questions,
/// regardless of CLO tagging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub component_id: ComponentId,
    pub name: String,
    pub total_students: usize,
    pub possible_marks: f64,
    pub average_percentage: Option<f64>,
    pub min_percentage: Option<f64>,
    pub max_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBandSummary {
    pub band: GradeBand,
    pub count: usize,
    pub mean_percentage: Option<f64>,
}

/// Scope: one course offering. A superset composition of the CLO
/// report plus enrollment and grade data, not a new aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseReport {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub offering: OfferingIdentity,
    pub enrollment: EnrollmentStatistics,
    pub overall_statistics: OverallStatistics,
    pub outcomes: Vector<CloOutcomeEntry>,
    pub components: Vector<ComponentSummary>,
    pub grade_distribution: Vec<GradeBandSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStatistics {
    pub course_count: usize,
    pub offering_count: usize,
    pub total_credit_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStatistics {
    pub active_students: usize,
    pub mean_sgpa: Option<f64>,
    pub mean_cgpa: Option<f64>,
}

/// Declared PEO, static data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeoEntry {
    pub peo_id: PeoId,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanEntry {
    pub plan_id: PlanId,
    pub title: String,
    pub description: String,
    pub created_on: NaiveDate,
}

/// Scope: one degree program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramReport {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub degree: DegreeIdentity,
    pub overall_statistics: OverallStatistics,
    pub outcomes: Vector<PloOutcomeEntry>,
    pub courses: CourseStatistics,
    pub students: StudentStatistics,
    pub peos: Vec<PeoEntry>,
    /// Most recent first, capped by `ReportOptions::action_plan_limit`.
    pub action_plans: Vec<ActionPlanEntry>,
}

/// Any assembled report, for format-agnostic writers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Clo(CloReport),
    Plo(PloReport),
    Course(CourseReport),
    Program(ProgramReport),
}

impl Report {
    pub fn report_type(&self) -> ReportType {
        match self {
            Report::Clo(r) => r.report_type,
            Report::Plo(r) => r.report_type,
            Report::Course(r) => r.report_type,
            Report::Program(r) => r.report_type,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        match self {
            Report::Clo(r) => r.generated_at,
            Report::Plo(r) => r.generated_at,
            Report::Course(r) => r.generated_at,
            Report::Program(r) => r.generated_at,
        }
    }
}
