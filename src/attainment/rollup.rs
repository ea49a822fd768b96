//! Weighted CLO-to-PLO rollup.
//!
//! Each mapped (CLO, offering) pair contributes its summary with the
//! mapping strength. CLOs with no data drop out of both numerator and
//! denominator, so the weighting renormalizes over the participants
//! instead of padding with zeros.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::attainment::clo::CloAttainmentSummary;
use crate::core::metrics::{self, round2};
use crate::core::{AttainmentStatus, CourseId, PloId, ProgramLearningOutcome, StudentId};

/// One CLO's contribution to a PLO rollup.
#[derive(Debug, Clone)]
pub struct CloContribution {
    pub summary: CloAttainmentSummary,
    pub strength: f64,
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    /// Distinct students the CLO actually assessed, for the
    /// deduplicated PLO student count.
    pub assessed_students: BTreeSet<StudentId>,
}

/// Informational annotation: one mapped CLO of one course, with the
/// attainment and strength that fed the rollup. Does not affect the
/// numeric aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingCourse {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub clo_code: String,
    pub average_attainment: Option<f64>,
    pub mapping_strength: f64,
}

/// Computed statistics for one PLO within a program/session scope.
///
/// Statistical shape mirrors the CLO summary. Per-student achieved
/// counts are not meaningful after a weighted rollup, so the summary
/// carries participating-CLO counts instead; `total_students` is the
/// distinct-student union across contributions, never a sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PloAttainmentSummary {
    pub plo_id: PloId,
    pub code: String,
    pub description: String,
    pub target_attainment: f64,
    pub total_students: usize,
    pub contributing_clos: usize,
    pub clos_achieved: usize,
    pub clos_not_achieved: usize,
    pub average_attainment: Option<f64>,
    pub min_attainment: Option<f64>,
    pub max_attainment: Option<f64>,
    pub std_deviation: Option<f64>,
    pub attainment_status: Option<AttainmentStatus>,
    pub contributing_courses: Vec<ContributingCourse>,
}

/// Weighted aggregation of CLO summaries into a PLO summary.
pub fn rollup_plo(
    plo: &ProgramLearningOutcome,
    contributions: &[CloContribution],
) -> PloAttainmentSummary {
    // Participants: contributions with data and a usable weight. A
    // zero strength cannot move a weighted mean, so it is skipped
    // rather than allowed to zero the denominator.
    let participants: Vec<(&CloContribution, f64)> = contributions
        .iter()
        .filter(|c| c.strength > 0.0)
        .filter_map(|c| c.summary.average_attainment.map(|avg| (c, avg)))
        .collect();

    let weight_sum: f64 = participants.iter().map(|(c, _)| c.strength).sum();
    let average = if weight_sum > 0.0 {
        let weighted: f64 = participants.iter().map(|(c, avg)| avg * c.strength).sum();
        Some(round2(weighted / weight_sum))
    } else {
        None
    };

    let averages: Vec<f64> = participants.iter().map(|(_, avg)| *avg).collect();
    let clos_achieved = participants
        .iter()
        .filter(|(c, _)| c.summary.attainment_status == Some(AttainmentStatus::Achieved))
        .count();

    // Union, not sum: a student assessed under several CLOs counts once.
    let students: BTreeSet<StudentId> = contributions
        .iter()
        .flat_map(|c| c.assessed_students.iter().copied())
        .collect();

    let mut contributing_courses: Vec<ContributingCourse> = contributions
        .iter()
        .map(|c| ContributingCourse {
            course_id: c.course_id,
            course_code: c.course_code.clone(),
            course_title: c.course_title.clone(),
            clo_code: c.summary.code.clone(),
            average_attainment: c.summary.average_attainment,
            mapping_strength: c.strength,
        })
        .collect();
    contributing_courses.sort_by(|a, b| {
        a.course_id
            .cmp(&b.course_id)
            .then_with(|| a.clo_code.cmp(&b.clo_code))
    });

    PloAttainmentSummary {
        plo_id: plo.id,
        code: plo.code.clone(),
        description: plo.description.clone(),
        target_attainment: plo.target_attainment,
        total_students: students.len(),
        contributing_clos: participants.len(),
        clos_achieved,
        clos_not_achieved: participants.len() - clos_achieved,
        average_attainment: average,
        min_attainment: metrics::min_value(&averages),
        max_attainment: metrics::max_value(&averages),
        std_deviation: metrics::population_std_dev(&averages).map(round2),
        attainment_status: average.map(|avg| AttainmentStatus::from_average(avg, plo.target_attainment)),
        contributing_courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attainment::clo::summarize_clo;
    use crate::attainment::marks::StudentAttainment;
    use crate::core::CourseLearningOutcome;

    fn plo(target: f64) -> ProgramLearningOutcome {
        ProgramLearningOutcome {
            id: 1,
            degree_id: 1,
            code: "PLO-1".into(),
            description: "Engineering knowledge".into(),
            target_attainment: target,
        }
    }

    fn contribution(
        clo_id: u32,
        target: f64,
        strength: f64,
        percentages: &[(u32, f64)],
    ) -> CloContribution {
        let clo = CourseLearningOutcome {
            id: clo_id,
            course_id: 1,
            code: format!("CLO-{clo_id}"),
            description: String::new(),
            target_attainment: target,
            weight_percentage: 0.0,
        };
        let students: Vec<StudentAttainment> = percentages
            .iter()
            .map(|(id, p)| StudentAttainment {
                student_id: *id,
                obtained: *p,
                possible: 100.0,
                percentage: *p,
            })
            .collect();
        CloContribution {
            summary: summarize_clo(&clo, &students),
            strength,
            course_id: 1,
            course_code: "CS101".into(),
            course_title: "Intro".into(),
            assessed_students: percentages.iter().map(|(id, _)| *id).collect(),
        }
    }

    #[test]
    fn weighted_average_of_two_clos() {
        // Averages 76.67 and 50 with strengths 0.6 and 0.4 -> 66.0.
        let contributions = [
            contribution(1, 75.0, 0.6, &[(1, 80.0), (2, 60.0), (3, 90.0)]),
            contribution(2, 75.0, 0.4, &[(4, 50.0)]),
        ];
        let summary = rollup_plo(&plo(70.0), &contributions);

        assert_eq!(summary.average_attainment, Some(66.0));
        assert_eq!(summary.contributing_clos, 2);
        assert_eq!(summary.attainment_status, Some(AttainmentStatus::NotAchieved));
    }

    #[test]
    fn students_are_deduplicated_across_clos() {
        // Students 1 and 2 assessed under both CLOs, 3 only under one.
        let contributions = [
            contribution(1, 75.0, 1.0, &[(1, 80.0), (2, 70.0)]),
            contribution(2, 75.0, 1.0, &[(1, 60.0), (2, 65.0), (3, 90.0)]),
        ];
        let summary = rollup_plo(&plo(70.0), &contributions);
        assert_eq!(summary.total_students, 3);
    }

    #[test]
    fn no_data_clos_renormalize_the_weighting() {
        // The empty CLO must not drag the average toward zero.
        let contributions = [
            contribution(1, 75.0, 0.9, &[]),
            contribution(2, 75.0, 0.1, &[(1, 80.0)]),
        ];
        let summary = rollup_plo(&plo(70.0), &contributions);
        assert_eq!(summary.average_attainment, Some(80.0));
        assert_eq!(summary.contributing_clos, 1);
    }

    #[test]
    fn zero_strength_contributions_are_skipped() {
        let contributions = [
            contribution(1, 75.0, 0.0, &[(1, 10.0)]),
            contribution(2, 75.0, 0.5, &[(2, 90.0)]),
        ];
        let summary = rollup_plo(&plo(70.0), &contributions);
        assert_eq!(summary.average_attainment, Some(90.0));
    }

    #[test]
    fn all_contributions_empty_yields_null_summary() {
        let contributions = [contribution(1, 75.0, 1.0, &[])];
        let summary = rollup_plo(&plo(70.0), &contributions);

        assert_eq!(summary.average_attainment, None);
        assert_eq!(summary.attainment_status, None);
        assert_eq!(summary.total_students, 0);
        assert_eq!(summary.contributing_clos, 0);
    }

    #[test]
    fn rollup_stays_within_contributing_bounds() {
        let contributions = [
            contribution(1, 75.0, 0.3, &[(1, 40.0)]),
            contribution(2, 75.0, 0.7, &[(2, 90.0)]),
        ];
        let summary = rollup_plo(&plo(70.0), &contributions);
        let avg = summary.average_attainment.unwrap();
        assert!(avg >= summary.min_attainment.unwrap());
        assert!(avg <= summary.max_attainment.unwrap());
    }
}
