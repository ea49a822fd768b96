//! The queryable-store boundary.
//!
//! The engine never talks to a database directly; it consumes raw rows
//! from a [`Store`] implementation and does all statistical work
//! itself. Implementations are expected to serve each report request
//! from a single consistent snapshot so statistics are not drawn from
//! marks recorded at different instants.

pub mod memory;

use thiserror::Error;

use crate::core::{
    AssessmentComponent, AssessmentQuestion, CloPloMapping, Course, CourseId,
    CourseLearningOutcome, CourseOffering, Degree, DegreeId, Enrollment, ImprovementActionPlan,
    OfferingId, ProgramEducationalObjective, ProgramLearningOutcome, Session, SessionId, Student,
    StudentMark,
};

/// Failure inside the backing store. The engine surfaces these
/// unchanged; it never retries or suppresses them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only row access for the attainment engine.
///
/// Single-entity lookups return `Ok(None)` when the id is unknown; the
/// engine turns that into its own `NotFound`. Row-set queries return
/// raw rows only, with no aggregation done store-side.
pub trait Store: Sync {
    fn degree(&self, id: DegreeId) -> StoreResult<Option<Degree>>;
    fn session(&self, id: SessionId) -> StoreResult<Option<Session>>;
    fn course(&self, id: CourseId) -> StoreResult<Option<Course>>;
    fn offering(&self, id: OfferingId) -> StoreResult<Option<CourseOffering>>;

    fn sessions(&self) -> StoreResult<Vec<Session>>;
    fn clos_for_course(&self, course_id: CourseId) -> StoreResult<Vec<CourseLearningOutcome>>;
    fn components_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> StoreResult<Vec<AssessmentComponent>>;
    fn questions_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> StoreResult<Vec<AssessmentQuestion>>;
    fn marks_for_offering(&self, offering_id: OfferingId) -> StoreResult<Vec<StudentMark>>;
    fn enrollments_for_offering(&self, offering_id: OfferingId) -> StoreResult<Vec<Enrollment>>;

    fn courses_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<Course>>;
    fn offerings_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<CourseOffering>>;
    fn plos_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<ProgramLearningOutcome>>;
    fn peos_for_degree(
        &self,
        degree_id: DegreeId,
    ) -> StoreResult<Vec<ProgramEducationalObjective>>;
    fn mappings_for_course(&self, course_id: CourseId) -> StoreResult<Vec<CloPloMapping>>;
    fn mappings_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<CloPloMapping>>;
    fn students_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<Student>>;
    fn action_plans_for_degree(
        &self,
        degree_id: DegreeId,
    ) -> StoreResult<Vec<ImprovementActionPlan>>;
}
