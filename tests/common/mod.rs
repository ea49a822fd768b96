// Test utility module for attainmap integration tests
#![allow(dead_code)]

use chrono::NaiveDate;

use attainmap::core::{
    AssessmentComponent, AssessmentQuestion, CloPloMapping, Course, CourseLearningOutcome,
    CourseOffering, Degree, Enrollment, EnrollmentStatus, ImprovementActionPlan,
    ProgramEducationalObjective, ProgramLearningOutcome, Session, Student, StudentMark,
};
use attainmap::store::memory::{Dataset, InMemoryStore};

/// Fluent dataset fixture builder shared by the integration suites.
pub struct DatasetBuilder {
    data: Dataset,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self {
            data: Dataset::default(),
        }
    }

    pub fn degree(mut self, id: u32, code: &str) -> Self {
        self.data.degrees.push(Degree {
            id,
            code: code.into(),
            title: format!("{code} program"),
        });
        self
    }

    pub fn session(mut self, id: u32, name: &str, starts_on: (i32, u32, u32)) -> Self {
        self.data.sessions.push(Session {
            id,
            name: name.into(),
            starts_on: NaiveDate::from_ymd_opt(starts_on.0, starts_on.1, starts_on.2).unwrap(),
        });
        self
    }

    pub fn course(mut self, id: u32, degree_id: u32, code: &str, credit_hours: f64) -> Self {
        self.data.courses.push(Course {
            id,
            degree_id,
            code: code.into(),
            title: format!("{code} course"),
            credit_hours,
        });
        self
    }

    pub fn offering(mut self, id: u32, course_id: u32, session_id: u32) -> Self {
        self.data.offerings.push(CourseOffering {
            id,
            course_id,
            session_id,
            section: "A".into(),
        });
        self
    }

    pub fn clo(mut self, id: u32, course_id: u32, code: &str, target: f64) -> Self {
        self.data.clos.push(CourseLearningOutcome {
            id,
            course_id,
            code: code.into(),
            description: format!("{code} description"),
            target_attainment: target,
            weight_percentage: 25.0,
        });
        self
    }

    pub fn clo_described(
        mut self,
        id: u32,
        course_id: u32,
        code: &str,
        description: &str,
        target: f64,
    ) -> Self {
        self.data.clos.push(CourseLearningOutcome {
            id,
            course_id,
            code: code.into(),
            description: description.into(),
            target_attainment: target,
            weight_percentage: 25.0,
        });
        self
    }

    pub fn plo(mut self, id: u32, degree_id: u32, code: &str, target: f64) -> Self {
        self.data.plos.push(ProgramLearningOutcome {
            id,
            degree_id,
            code: code.into(),
            description: format!("{code} description"),
            target_attainment: target,
        });
        self
    }

    pub fn peo(mut self, id: u32, degree_id: u32, code: &str) -> Self {
        self.data.peos.push(ProgramEducationalObjective {
            id,
            degree_id,
            code: code.into(),
            description: format!("{code} description"),
        });
        self
    }

    pub fn mapping(mut self, clo_id: u32, plo_id: u32, strength: f64) -> Self {
        self.data.mappings.push(CloPloMapping {
            clo_id,
            plo_id,
            strength,
        });
        self
    }

    pub fn component(mut self, id: u32, offering_id: u32, name: &str) -> Self {
        self.data.components.push(AssessmentComponent {
            id,
            offering_id,
            name: name.into(),
        });
        self
    }

    pub fn question(
        mut self,
        id: u32,
        component_id: u32,
        offering_id: u32,
        clo_id: u32,
        possible_marks: f64,
    ) -> Self {
        let number = self
            .data
            .questions
            .iter()
            .filter(|q| q.component_id == component_id)
            .count() as u32
            + 1;
        self.data.questions.push(AssessmentQuestion {
            id,
            component_id,
            offering_id,
            clo_id,
            number,
            possible_marks,
        });
        self
    }

    pub fn mark(mut self, student_id: u32, question_id: u32, obtained: f64) -> Self {
        self.data.marks.push(StudentMark {
            student_id,
            question_id,
            marks_obtained: obtained,
        });
        self
    }

    pub fn enroll(self, student_id: u32, offering_id: u32) -> Self {
        self.enroll_with_status(student_id, offering_id, EnrollmentStatus::Active)
    }

    pub fn enroll_with_status(
        mut self,
        student_id: u32,
        offering_id: u32,
        status: EnrollmentStatus,
    ) -> Self {
        self.data.enrollments.push(Enrollment {
            student_id,
            offering_id,
            status,
        });
        self
    }

    pub fn student(
        mut self,
        id: u32,
        degree_id: u32,
        sgpa: Option<f64>,
        cgpa: Option<f64>,
    ) -> Self {
        self.data.students.push(Student {
            id,
            degree_id,
            name: format!("Student {id}"),
            is_active: true,
            sgpa,
            cgpa,
        });
        self
    }

    pub fn action_plan(
        mut self,
        id: u32,
        degree_id: u32,
        title: &str,
        created_on: (i32, u32, u32),
    ) -> Self {
        self.data.action_plans.push(ImprovementActionPlan {
            id,
            degree_id,
            title: title.into(),
            description: format!("{title} details"),
            created_on: NaiveDate::from_ymd_opt(created_on.0, created_on.1, created_on.2).unwrap(),
        });
        self
    }

    pub fn build(self) -> InMemoryStore {
        InMemoryStore::new(self.data)
    }
}

/// One offering of one course, one CLO (target 75) assessed by two
/// 10-mark questions, students 1-3 scoring 80/60/90 percent.
pub fn sample_offering_store() -> InMemoryStore {
    DatasetBuilder::new()
        .degree(1, "BSCS")
        .session(1, "Fall 2024", (2024, 9, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .clo(1, 1, "CLO-1", 75.0)
        .component(1, 1, "Midterm")
        .question(1, 1, 1, 1, 10.0)
        .question(2, 1, 1, 1, 10.0)
        .enroll(1, 1)
        .enroll(2, 1)
        .enroll(3, 1)
        .mark(1, 1, 8.0)
        .mark(1, 2, 8.0)
        .mark(2, 1, 6.0)
        .mark(2, 2, 6.0)
        .mark(3, 1, 9.0)
        .mark(3, 2, 9.0)
        .build()
}
