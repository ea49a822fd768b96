// Export modules for library usage
pub mod attainment;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use crate::attainment::clo::{summarize_clo, CloAttainmentSummary};
pub use crate::attainment::gap::{
    analyze_gap, classify_gap, GapAnalysis, GapTier, NEAR_TARGET_MAX_GAP,
    NEEDS_IMPROVEMENT_MAX_GAP,
};
pub use crate::attainment::marks::{
    aggregate_attainment, aggregate_clo_attainment, StudentAttainment,
};
pub use crate::attainment::rollup::{
    rollup_plo, CloContribution, ContributingCourse, PloAttainmentSummary,
};

pub use crate::core::errors::{EngineError, EngineResult};
pub use crate::core::{AttainmentStatus, EnrollmentStatus, GradeBand};

pub use crate::report::assembler::{
    generate_clo_report, generate_course_report, generate_plo_report, generate_program_report,
};
pub use crate::report::{
    CloReport, CourseReport, OverallStatistics, PloReport, ProgramReport, Report, ReportType,
};

pub use crate::config::ReportOptions;
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
pub use crate::store::memory::{Dataset, InMemoryStore};
pub use crate::store::{Store, StoreError, StoreResult};
