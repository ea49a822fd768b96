//! Mark aggregation: raw per-question marks to one attainment
//! percentage per assessed student.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::metrics::round2;
use crate::core::{AssessmentQuestion, CloId, QuestionId, StudentId, StudentMark};

/// One student's attainment against one set of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAttainment {
    pub student_id: StudentId,
    pub obtained: f64,
    pub possible: f64,
    pub percentage: f64,
}

/// Reduce marks over an arbitrary question set to per-student
/// percentages, sorted by student id.
///
/// A student with no mark rows for any of the questions is excluded,
/// not treated as 0% (missing is not zero). When the question set
/// carries no possible marks at all, nobody has a percentage.
pub fn aggregate_attainment(
    questions: &[AssessmentQuestion],
    marks: &[StudentMark],
    assessed_students: &BTreeSet<StudentId>,
) -> Vec<StudentAttainment> {
    let question_marks: BTreeMap<QuestionId, f64> =
        questions.iter().map(|q| (q.id, q.possible_marks)).collect();
    let possible: f64 = question_marks.values().sum();
    if possible <= 0.0 {
        return Vec::new();
    }

    let mut obtained: BTreeMap<StudentId, f64> = BTreeMap::new();
    for mark in marks {
        if !question_marks.contains_key(&mark.question_id) {
            continue;
        }
        if !assessed_students.contains(&mark.student_id) {
            continue;
        }
        *obtained.entry(mark.student_id).or_insert(0.0) += mark.marks_obtained;
    }

    obtained
        .into_iter()
        .map(|(student_id, got)| StudentAttainment {
            student_id,
            obtained: got,
            possible,
            percentage: round2(got / possible * 100.0),
        })
        .collect()
}

/// Restrict the offering's questions to those tagged with `clo_id`,
/// then aggregate.
pub fn aggregate_clo_attainment(
    clo_id: CloId,
    questions: &[AssessmentQuestion],
    marks: &[StudentMark],
    assessed_students: &BTreeSet<StudentId>,
) -> Vec<StudentAttainment> {
    let clo_questions: Vec<AssessmentQuestion> = questions
        .iter()
        .filter(|q| q.clo_id == clo_id)
        .cloned()
        .collect();
    aggregate_attainment(&clo_questions, marks, assessed_students)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: QuestionId, clo_id: CloId, possible_marks: f64) -> AssessmentQuestion {
        AssessmentQuestion {
            id,
            component_id: 1,
            offering_id: 1,
            clo_id,
            number: id,
            possible_marks,
        }
    }

    fn mark(student_id: StudentId, question_id: QuestionId, obtained: f64) -> StudentMark {
        StudentMark {
            student_id,
            question_id,
            marks_obtained: obtained,
        }
    }

    #[test]
    fn sums_marks_across_tagged_questions() {
        let questions = vec![question(1, 10, 10.0), question(2, 10, 10.0)];
        let marks = vec![mark(100, 1, 10.0), mark(100, 2, 8.0)];
        let assessed = BTreeSet::from([100]);

        let result = aggregate_clo_attainment(10, &questions, &marks, &assessed);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].percentage, 90.0);
        assert_eq!(result[0].obtained, 18.0);
        assert_eq!(result[0].possible, 20.0);
    }

    #[test]
    fn student_without_any_rows_is_excluded() {
        let questions = vec![question(1, 10, 10.0)];
        let marks = vec![mark(100, 1, 9.0)];
        let assessed = BTreeSet::from([100, 200]);

        let result = aggregate_clo_attainment(10, &questions, &marks, &assessed);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].student_id, 100);
    }

    #[test]
    fn partial_rows_keep_the_full_denominator() {
        let questions = vec![question(1, 10, 10.0), question(2, 10, 10.0)];
        let marks = vec![mark(100, 1, 10.0)];
        let assessed = BTreeSet::from([100]);

        let result = aggregate_clo_attainment(10, &questions, &marks, &assessed);
        assert_eq!(result[0].percentage, 50.0);
    }

    #[test]
    fn zero_possible_marks_yields_no_percentages() {
        let questions = vec![question(1, 10, 0.0)];
        let marks = vec![mark(100, 1, 0.0)];
        let assessed = BTreeSet::from([100]);

        assert!(aggregate_clo_attainment(10, &questions, &marks, &assessed).is_empty());
    }

    #[test]
    fn unenrolled_marks_are_ignored() {
        let questions = vec![question(1, 10, 10.0)];
        let marks = vec![mark(100, 1, 9.0), mark(999, 1, 10.0)];
        let assessed = BTreeSet::from([100]);

        let result = aggregate_clo_attainment(10, &questions, &marks, &assessed);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].student_id, 100);
    }

    #[test]
    fn questions_of_other_clos_do_not_contribute() {
        let questions = vec![question(1, 10, 10.0), question(2, 11, 50.0)];
        let marks = vec![mark(100, 1, 5.0), mark(100, 2, 50.0)];
        let assessed = BTreeSet::from([100]);

        let result = aggregate_clo_attainment(10, &questions, &marks, &assessed);
        assert_eq!(result[0].percentage, 50.0);
    }
}
