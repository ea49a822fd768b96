//! Core domain types shared across the attainment pipeline.
//!
//! These are the raw row shapes the store returns and the small
//! classification enums the engine attaches to computed statistics.
//! All statistics themselves live in the `attainment` and `report`
//! modules; nothing here is derived data.

pub mod errors;
pub mod metrics;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type DegreeId = u32;
pub type SessionId = u32;
pub type CourseId = u32;
pub type OfferingId = u32;
pub type CloId = u32;
pub type PloId = u32;
pub type PeoId = u32;
pub type ComponentId = u32;
pub type QuestionId = u32;
pub type StudentId = u32;
pub type PlanId = u32;

/// A degree program (e.g. BS Computer Science).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub id: DegreeId,
    pub code: String,
    pub title: String,
}

/// An academic session. Chronological order is `starts_on` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub starts_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub degree_id: DegreeId,
    pub code: String,
    pub title: String,
    pub credit_hours: f64,
}

/// One taught instance of a course in a session. Immutable once a
/// report references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub id: OfferingId,
    pub course_id: CourseId,
    pub session_id: SessionId,
    pub section: String,
}

/// A measurable course-level outcome. `target_attainment` is a
/// percentage in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLearningOutcome {
    pub id: CloId,
    pub course_id: CourseId,
    pub code: String,
    pub description: String,
    pub target_attainment: f64,
    pub weight_percentage: f64,
}

/// A measurable program-level outcome, fed by mapped CLOs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramLearningOutcome {
    pub id: PloId,
    pub degree_id: DegreeId,
    pub code: String,
    pub description: String,
    pub target_attainment: f64,
}

/// A long-term programmatic goal. Static data, never computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEducationalObjective {
    pub id: PeoId,
    pub degree_id: DegreeId,
    pub code: String,
    pub description: String,
}

/// How strongly a CLO contributes to a PLO. `strength` is a
/// non-negative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloPloMapping {
    pub clo_id: CloId,
    pub plo_id: PloId,
    pub strength: f64,
}

/// An assessment instrument within an offering (quiz, midterm, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentComponent {
    pub id: ComponentId,
    pub offering_id: OfferingId,
    pub name: String,
}

/// One question of an assessment component, tagged with the CLO it
/// measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: QuestionId,
    pub component_id: ComponentId,
    pub offering_id: OfferingId,
    pub clo_id: CloId,
    pub number: u32,
    pub possible_marks: f64,
}

/// One student's marks on one question. Invariant:
/// `0 <= marks_obtained <= possible_marks` of the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentMark {
    pub student_id: StudentId,
    pub question_id: QuestionId,
    pub marks_obtained: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Active,
    Dropped,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub offering_id: OfferingId,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub degree_id: DegreeId,
    pub name: String,
    pub is_active: bool,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
}

/// A continuous-improvement action plan recorded against a degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementActionPlan {
    pub id: PlanId,
    pub degree_id: DegreeId,
    pub title: String,
    pub description: String,
    pub created_on: NaiveDate,
}

/// Threshold classification of an outcome's average against its target.
///
/// Always carried as `Option<AttainmentStatus>`: `None` means "no data"
/// and must never be conflated with `NotAchieved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttainmentStatus {
    Achieved,
    NotAchieved,
}

impl AttainmentStatus {
    /// `Achieved` iff the average meets the target.
    pub fn from_average(average: f64, target: f64) -> Self {
        if average >= target {
            AttainmentStatus::Achieved
        } else {
            AttainmentStatus::NotAchieved
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttainmentStatus::Achieved => "Achieved",
            AttainmentStatus::NotAchieved => "Not Achieved",
        }
    }
}

/// Minimum whole-offering percentage for each grade band.
pub const GRADE_A_MIN: f64 = 80.0;
pub const GRADE_B_MIN: f64 = 65.0;
pub const GRADE_C_MIN: f64 = 50.0;
pub const GRADE_D_MIN: f64 = 40.0;

/// Letter-grade band over a student's whole-offering percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    F,
}

impl GradeBand {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= GRADE_A_MIN {
            GradeBand::A
        } else if percentage >= GRADE_B_MIN {
            GradeBand::B
        } else if percentage >= GRADE_C_MIN {
            GradeBand::C
        } else if percentage >= GRADE_D_MIN {
            GradeBand::D
        } else {
            GradeBand::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::A => "A",
            GradeBand::B => "B",
            GradeBand::C => "C",
            GradeBand::D => "D",
            GradeBand::F => "F",
        }
    }

    /// All bands in display order.
    pub fn all() -> [GradeBand; 5] {
        [
            GradeBand::A,
            GradeBand::B,
            GradeBand::C,
            GradeBand::D,
            GradeBand::F,
        ]
    }
}
