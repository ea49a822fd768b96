//! In-memory store over a serde-loadable dataset snapshot.
//!
//! Backs the CLI (JSON dataset files) and the test suites. Being a
//! plain owned snapshot, it is trivially consistent for the duration
//! of a report call.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{
    AssessmentComponent, AssessmentQuestion, CloPloMapping, Course, CourseId,
    CourseLearningOutcome, CourseOffering, Degree, DegreeId, Enrollment, ImprovementActionPlan,
    OfferingId, ProgramEducationalObjective, ProgramLearningOutcome, QuestionId, Session,
    SessionId, Student, StudentMark,
};
use crate::store::{Store, StoreError, StoreResult};

/// Every row collection the engine can query, in one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub degrees: Vec<Degree>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub offerings: Vec<CourseOffering>,
    #[serde(default)]
    pub clos: Vec<CourseLearningOutcome>,
    #[serde(default)]
    pub plos: Vec<ProgramLearningOutcome>,
    #[serde(default)]
    pub peos: Vec<ProgramEducationalObjective>,
    #[serde(default)]
    pub mappings: Vec<CloPloMapping>,
    #[serde(default)]
    pub components: Vec<AssessmentComponent>,
    #[serde(default)]
    pub questions: Vec<AssessmentQuestion>,
    #[serde(default)]
    pub marks: Vec<StudentMark>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub action_plans: Vec<ImprovementActionPlan>,
}

#[derive(Debug)]
pub struct InMemoryStore {
    data: Dataset,
}

impl InMemoryStore {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let data: Dataset =
            serde_json::from_str(json).map_err(|e| StoreError::Query(format!("bad dataset: {e}")))?;
        Ok(Self::new(data))
    }

    pub fn from_json_file(path: &Path) -> StoreResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| StoreError::Query(format!("cannot read {}: {e}", path.display())))?;
        let store = Self::from_json_str(&raw)?;
        log::debug!("loaded dataset from {}", path.display());
        Ok(store)
    }

    fn degree_course_ids(&self, degree_id: DegreeId) -> HashSet<CourseId> {
        self.data
            .courses
            .iter()
            .filter(|c| c.degree_id == degree_id)
            .map(|c| c.id)
            .collect()
    }
}

impl Store for InMemoryStore {
    fn degree(&self, id: DegreeId) -> StoreResult<Option<Degree>> {
        Ok(self.data.degrees.iter().find(|d| d.id == id).cloned())
    }

    fn session(&self, id: SessionId) -> StoreResult<Option<Session>> {
        Ok(self.data.sessions.iter().find(|s| s.id == id).cloned())
    }

    fn course(&self, id: CourseId) -> StoreResult<Option<Course>> {
        Ok(self.data.courses.iter().find(|c| c.id == id).cloned())
    }

    fn offering(&self, id: OfferingId) -> StoreResult<Option<CourseOffering>> {
        Ok(self.data.offerings.iter().find(|o| o.id == id).cloned())
    }

    fn sessions(&self) -> StoreResult<Vec<Session>> {
        Ok(self.data.sessions.clone())
    }

    fn clos_for_course(&self, course_id: CourseId) -> StoreResult<Vec<CourseLearningOutcome>> {
        Ok(self
            .data
            .clos
            .iter()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect())
    }

    fn components_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> StoreResult<Vec<AssessmentComponent>> {
        Ok(self
            .data
            .components
            .iter()
            .filter(|c| c.offering_id == offering_id)
            .cloned()
            .collect())
    }

    fn questions_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> StoreResult<Vec<AssessmentQuestion>> {
        Ok(self
            .data
            .questions
            .iter()
            .filter(|q| q.offering_id == offering_id)
            .cloned()
            .collect())
    }

    fn marks_for_offering(&self, offering_id: OfferingId) -> StoreResult<Vec<StudentMark>> {
        let question_ids: HashSet<QuestionId> = self
            .data
            .questions
            .iter()
            .filter(|q| q.offering_id == offering_id)
            .map(|q| q.id)
            .collect();
        Ok(self
            .data
            .marks
            .iter()
            .filter(|m| question_ids.contains(&m.question_id))
            .cloned()
            .collect())
    }

    fn enrollments_for_offering(&self, offering_id: OfferingId) -> StoreResult<Vec<Enrollment>> {
        Ok(self
            .data
            .enrollments
            .iter()
            .filter(|e| e.offering_id == offering_id)
            .cloned()
            .collect())
    }

    fn courses_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<Course>> {
        Ok(self
            .data
            .courses
            .iter()
            .filter(|c| c.degree_id == degree_id)
            .cloned()
            .collect())
    }

    fn offerings_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<CourseOffering>> {
        let course_ids = self.degree_course_ids(degree_id);
        Ok(self
            .data
            .offerings
            .iter()
            .filter(|o| course_ids.contains(&o.course_id))
            .cloned()
            .collect())
    }

    fn plos_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<ProgramLearningOutcome>> {
        Ok(self
            .data
            .plos
            .iter()
            .filter(|p| p.degree_id == degree_id)
            .cloned()
            .collect())
    }

    fn peos_for_degree(
        &self,
        degree_id: DegreeId,
    ) -> StoreResult<Vec<ProgramEducationalObjective>> {
        Ok(self
            .data
            .peos
            .iter()
            .filter(|p| p.degree_id == degree_id)
            .cloned()
            .collect())
    }

    fn mappings_for_course(&self, course_id: CourseId) -> StoreResult<Vec<CloPloMapping>> {
        let clo_ids: HashSet<u32> = self
            .data
            .clos
            .iter()
            .filter(|c| c.course_id == course_id)
            .map(|c| c.id)
            .collect();
        Ok(self
            .data
            .mappings
            .iter()
            .filter(|m| clo_ids.contains(&m.clo_id))
            .cloned()
            .collect())
    }

    fn mappings_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<CloPloMapping>> {
        let course_ids = self.degree_course_ids(degree_id);
        let clo_ids: HashSet<u32> = self
            .data
            .clos
            .iter()
            .filter(|c| course_ids.contains(&c.course_id))
            .map(|c| c.id)
            .collect();
        Ok(self
            .data
            .mappings
            .iter()
            .filter(|m| clo_ids.contains(&m.clo_id))
            .cloned()
            .collect())
    }

    fn students_for_degree(&self, degree_id: DegreeId) -> StoreResult<Vec<Student>> {
        Ok(self
            .data
            .students
            .iter()
            .filter(|s| s.degree_id == degree_id)
            .cloned()
            .collect())
    }

    fn action_plans_for_degree(
        &self,
        degree_id: DegreeId,
    ) -> StoreResult<Vec<ImprovementActionPlan>> {
        Ok(self
            .data
            .action_plans
            .iter()
            .filter(|p| p.degree_id == degree_id)
            .cloned()
            .collect())
    }
}
