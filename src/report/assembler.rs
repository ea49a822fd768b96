//! Report assembly: fetches rows from the store once per request,
//! then fans out the pure per-outcome computations and composes the
//! nested documents. A report is all-or-nothing; a missing root
//! entity aborts before any statistics are computed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use im::Vector;
use rayon::prelude::*;

use crate::attainment::clo::summarize_clo;
use crate::attainment::gap::analyze_gap;
use crate::attainment::marks::{aggregate_attainment, aggregate_clo_attainment, StudentAttainment};
use crate::attainment::rollup::{rollup_plo, CloContribution};
use crate::config::ReportOptions;
use crate::core::errors::{EngineError, EngineResult};
use crate::core::metrics::{self, round2};
use crate::core::{
    AssessmentComponent, AssessmentQuestion, CloPloMapping, Course, CourseLearningOutcome,
    CourseOffering, DegreeId, Enrollment, EnrollmentStatus, GradeBand, OfferingId, PloId,
    ProgramLearningOutcome, Session, SessionId, StudentId, StudentMark,
};
use crate::report::{
    ActionPlanEntry, CloOutcomeEntry, CloReport, ComponentAttainment, ComponentSummary,
    CourseReport, CourseStatistics, DegreeIdentity, EnrollmentStatistics, GradeBandSummary,
    OfferingIdentity, OverallStatistics, PeoEntry, PloMappingRef, PloOutcomeEntry, PloReport,
    ProgramReport, Report, ReportType, SessionRef, StudentOutcome, StudentStatistics, TrendPoint,
};
use crate::store::Store;

/// Everything one offering-scoped computation needs, fetched up front
/// as a single consistent read.
struct OfferingRows {
    offering: CourseOffering,
    course: Course,
    session: Session,
    clos: Vec<CourseLearningOutcome>,
    components: Vec<AssessmentComponent>,
    questions: Vec<AssessmentQuestion>,
    marks: Vec<StudentMark>,
    enrollments: Vec<Enrollment>,
}

/// A CLO summary paired with the per-student percentages it was
/// computed from; the latter feeds detail blocks and dedup sets.
struct CloComputation {
    clo: CourseLearningOutcome,
    students: Vec<StudentAttainment>,
    summary: crate::attainment::clo::CloAttainmentSummary,
}

fn fetch_offering_rows(store: &dyn Store, offering_id: OfferingId) -> EngineResult<OfferingRows> {
    let offering = store.offering(offering_id)?.ok_or(EngineError::NotFound {
        entity: "course offering",
        id: offering_id,
    })?;
    let course = store.course(offering.course_id)?.ok_or(EngineError::NotFound {
        entity: "course",
        id: offering.course_id,
    })?;
    let session = store.session(offering.session_id)?.ok_or(EngineError::NotFound {
        entity: "session",
        id: offering.session_id,
    })?;

    let mut clos = store.clos_for_course(course.id)?;
    clos.sort_by_key(|c| c.id);
    let mut components = store.components_for_offering(offering_id)?;
    components.sort_by_key(|c| c.id);

    Ok(OfferingRows {
        questions: store.questions_for_offering(offering_id)?,
        marks: store.marks_for_offering(offering_id)?,
        enrollments: store.enrollments_for_offering(offering_id)?,
        offering,
        course,
        session,
        clos,
        components,
    })
}

/// Only active enrollments count as assessed; dropped and withdrawn
/// students appear in enrollment statistics alone.
fn assessed_students(enrollments: &[Enrollment]) -> BTreeSet<StudentId> {
    enrollments
        .iter()
        .filter(|e| e.status == EnrollmentStatus::Active)
        .map(|e| e.student_id)
        .collect()
}

/// Per-CLO fan-out: each CLO's aggregation is independent of the rest.
fn compute_clo_summaries(rows: &OfferingRows) -> Vec<CloComputation> {
    let assessed = assessed_students(&rows.enrollments);
    rows.clos
        .par_iter()
        .map(|clo| {
            let students =
                aggregate_clo_attainment(clo.id, &rows.questions, &rows.marks, &assessed);
            let summary = summarize_clo(clo, &students);
            CloComputation {
                clo: clo.clone(),
                students,
                summary,
            }
        })
        .collect()
}

fn offering_identity(rows: &OfferingRows) -> OfferingIdentity {
    OfferingIdentity {
        offering_id: rows.offering.id,
        course_id: rows.course.id,
        course_code: rows.course.code.clone(),
        course_title: rows.course.title.clone(),
        section: rows.offering.section.clone(),
        session_id: rows.session.id,
        session_name: rows.session.name.clone(),
    }
}

/// One CLO's statistics restricted to each assessment component that
/// carries questions tagged with it.
fn component_breakdown(rows: &OfferingRows, clo_id: u32) -> Vec<ComponentAttainment> {
    let assessed = assessed_students(&rows.enrollments);
    rows.components
        .iter()
        .filter_map(|component| {
            let questions: Vec<AssessmentQuestion> = rows
                .questions
                .iter()
                .filter(|q| q.component_id == component.id && q.clo_id == clo_id)
                .cloned()
                .collect();
            if questions.is_empty() {
                return None;
            }
            let students = aggregate_attainment(&questions, &rows.marks, &assessed);
            let percentages: Vec<f64> = students.iter().map(|s| s.percentage).collect();
            Some(ComponentAttainment {
                component_id: component.id,
                component_name: component.name.clone(),
                total_students: students.len(),
                average_attainment: metrics::mean(&percentages).map(round2),
                min_attainment: metrics::min_value(&percentages),
                max_attainment: metrics::max_value(&percentages),
            })
        })
        .collect()
}

fn clo_outcome_entries(
    rows: &OfferingRows,
    computations: &[CloComputation],
    mappings: &[CloPloMapping],
    plo_codes: &BTreeMap<PloId, String>,
    options: &ReportOptions,
) -> Vector<CloOutcomeEntry> {
    computations
        .iter()
        .map(|comp| {
            let gap = comp
                .summary
                .average_attainment
                .map(|avg| analyze_gap(comp.summary.target_attainment, avg));

            let mut plo_mappings: Vec<PloMappingRef> = mappings
                .iter()
                .filter(|m| m.clo_id == comp.clo.id)
                .map(|m| PloMappingRef {
                    plo_id: m.plo_id,
                    plo_code: plo_codes.get(&m.plo_id).cloned().unwrap_or_default(),
                    mapping_strength: m.strength,
                })
                .collect();
            plo_mappings.sort_by_key(|m| m.plo_id);

            let components = options
                .include_components
                .then(|| component_breakdown(rows, comp.clo.id));
            let students = options.include_students.then(|| {
                comp.students
                    .iter()
                    .map(|s| StudentOutcome {
                        student_id: s.student_id,
                        percentage: s.percentage,
                        achieved: s.percentage >= comp.summary.target_attainment,
                    })
                    .collect()
            });

            CloOutcomeEntry {
                summary: comp.summary.clone(),
                gap,
                plo_mappings,
                components,
                students,
            }
        })
        .collect()
}

fn overall_from_clo(computations: &[CloComputation]) -> OverallStatistics {
    let outcomes: Vec<_> = computations
        .iter()
        .map(|c| (c.summary.average_attainment, c.summary.attainment_status))
        .collect();
    OverallStatistics::from_outcomes(&outcomes)
}

/// Generate the per-CLO attainment report for one course offering.
pub fn generate_clo_report(
    store: &dyn Store,
    offering_id: OfferingId,
    options: &ReportOptions,
) -> EngineResult<CloReport> {
    let rows = fetch_offering_rows(store, offering_id)?;
    let mappings = store.mappings_for_course(rows.course.id)?;
    let plo_codes: BTreeMap<PloId, String> = store
        .plos_for_degree(rows.course.degree_id)?
        .into_iter()
        .map(|p| (p.id, p.code))
        .collect();

    let computations = compute_clo_summaries(&rows);
    log::debug!(
        "clo report for offering {}: {} outcomes",
        offering_id,
        computations.len()
    );

    Ok(CloReport {
        report_type: ReportType::CloAttainment,
        generated_at: Utc::now(),
        offering: offering_identity(&rows),
        overall_statistics: overall_from_clo(&computations),
        outcomes: clo_outcome_entries(&rows, &computations, &mappings, &plo_codes, options),
    })
}

/// Contributions per PLO over every offering of the degree in scope.
fn plo_contributions(
    store: &dyn Store,
    degree_id: DegreeId,
    session: Option<SessionId>,
) -> EngineResult<BTreeMap<PloId, Vec<CloContribution>>> {
    let mappings = store.mappings_for_degree(degree_id)?;
    let mut offerings = store.offerings_for_degree(degree_id)?;
    offerings.sort_by_key(|o| o.id);

    let mut all_rows = Vec::new();
    for offering in &offerings {
        if let Some(session_id) = session {
            if offering.session_id != session_id {
                continue;
            }
        }
        all_rows.push(fetch_offering_rows(store, offering.id)?);
    }

    // Offerings are independent; summarize them in parallel.
    let computed: Vec<(usize, Vec<CloComputation>)> = all_rows
        .par_iter()
        .enumerate()
        .map(|(idx, rows)| (idx, compute_clo_summaries(rows)))
        .collect();

    let mut by_plo: BTreeMap<PloId, Vec<CloContribution>> = BTreeMap::new();
    for (idx, computations) in computed {
        let rows = &all_rows[idx];
        for comp in computations {
            for mapping in mappings.iter().filter(|m| m.clo_id == comp.clo.id) {
                by_plo
                    .entry(mapping.plo_id)
                    .or_default()
                    .push(CloContribution {
                        summary: comp.summary.clone(),
                        strength: mapping.strength,
                        course_id: rows.course.id,
                        course_code: rows.course.code.clone(),
                        course_title: rows.course.title.clone(),
                        assessed_students: comp
                            .students
                            .iter()
                            .map(|s| s.student_id)
                            .collect(),
                    });
            }
        }
    }
    Ok(by_plo)
}

/// Per-session attainment history for each PLO, chronological, one
/// point per session that actually contributed data.
fn trend_series(
    store: &dyn Store,
    degree_id: DegreeId,
    plos: &[ProgramLearningOutcome],
) -> EngineResult<BTreeMap<PloId, Vec<TrendPoint>>> {
    let mut sessions = store.sessions()?;
    sessions.sort_by(|a, b| a.starts_on.cmp(&b.starts_on).then(a.id.cmp(&b.id)));

    let mut series: BTreeMap<PloId, Vec<TrendPoint>> = BTreeMap::new();
    for session in &sessions {
        let by_plo = plo_contributions(store, degree_id, Some(session.id))?;
        for plo in plos {
            let Some(contributions) = by_plo.get(&plo.id) else {
                continue;
            };
            let summary = rollup_plo(plo, contributions);
            if summary.average_attainment.is_none() {
                continue;
            }
            series.entry(plo.id).or_default().push(TrendPoint {
                session_id: session.id,
                session_name: session.name.clone(),
                average_attainment: summary.average_attainment,
            });
        }
    }
    Ok(series)
}

fn assemble_plo_outcomes(
    store: &dyn Store,
    degree_id: DegreeId,
    session: Option<SessionId>,
    options: &ReportOptions,
) -> EngineResult<(Vector<PloOutcomeEntry>, OverallStatistics)> {
    let mut plos = store.plos_for_degree(degree_id)?;
    plos.sort_by_key(|p| p.id);

    let contributions = plo_contributions(store, degree_id, session)?;
    let trends = if options.include_trend {
        Some(trend_series(store, degree_id, &plos)?)
    } else {
        None
    };

    let empty: Vec<CloContribution> = Vec::new();
    let outcomes: Vector<PloOutcomeEntry> = plos
        .iter()
        .map(|plo| {
            let summary = rollup_plo(plo, contributions.get(&plo.id).unwrap_or(&empty));
            let gap = summary
                .average_attainment
                .map(|avg| analyze_gap(plo.target_attainment, avg));
            let trend = trends
                .as_ref()
                .map(|t| t.get(&plo.id).cloned().unwrap_or_default());
            PloOutcomeEntry { summary, gap, trend }
        })
        .collect();

    let pairs: Vec<_> = outcomes
        .iter()
        .map(|o| (o.summary.average_attainment, o.summary.attainment_status))
        .collect();
    Ok((outcomes, OverallStatistics::from_outcomes(&pairs)))
}

/// Generate the per-PLO attainment report for one degree program.
pub fn generate_plo_report(
    store: &dyn Store,
    degree_id: DegreeId,
    session: Option<SessionId>,
    options: &ReportOptions,
) -> EngineResult<PloReport> {
    let degree = store.degree(degree_id)?.ok_or(EngineError::NotFound {
        entity: "degree",
        id: degree_id,
    })?;
    let session_filter = match session {
        Some(id) => {
            let session = store.session(id)?.ok_or(EngineError::NotFound {
                entity: "session",
                id,
            })?;
            Some(SessionRef {
                session_id: session.id,
                name: session.name,
            })
        }
        None => None,
    };

    let (outcomes, overall_statistics) =
        assemble_plo_outcomes(store, degree_id, session, options)?;

    Ok(PloReport {
        report_type: ReportType::PloAttainment,
        generated_at: Utc::now(),
        degree: DegreeIdentity {
            degree_id: degree.id,
            code: degree.code,
            title: degree.title,
        },
        session_filter,
        overall_statistics,
        outcomes,
    })
}

fn enrollment_statistics(enrollments: &[Enrollment]) -> EnrollmentStatistics {
    let count = |status: EnrollmentStatus| {
        enrollments.iter().filter(|e| e.status == status).count()
    };
    EnrollmentStatistics {
        total: enrollments.len(),
        active: count(EnrollmentStatus::Active),
        dropped: count(EnrollmentStatus::Dropped),
        withdrawn: count(EnrollmentStatus::Withdrawn),
    }
}

/// Whole-component mark summaries, independent of CLO tagging.
fn component_summaries(rows: &OfferingRows) -> Vector<ComponentSummary> {
    let assessed = assessed_students(&rows.enrollments);
    rows.components
        .iter()
        .map(|component| {
            let questions: Vec<AssessmentQuestion> = rows
                .questions
                .iter()
                .filter(|q| q.component_id == component.id)
                .cloned()
                .collect();
            let possible: f64 = questions.iter().map(|q| q.possible_marks).sum();
            let students = aggregate_attainment(&questions, &rows.marks, &assessed);
            let percentages: Vec<f64> = students.iter().map(|s| s.percentage).collect();
            ComponentSummary {
                component_id: component.id,
                name: component.name.clone(),
                total_students: students.len(),
                possible_marks: possible,
                average_percentage: metrics::mean(&percentages).map(round2),
                min_percentage: metrics::min_value(&percentages),
                max_percentage: metrics::max_value(&percentages),
            }
        })
        .collect()
}

/// Grade distribution over each student's whole-offering percentage.
/// All bands are listed, empty ones with a zero count.
fn grade_distribution(rows: &OfferingRows) -> Vec<GradeBandSummary> {
    let assessed = assessed_students(&rows.enrollments);
    let students = aggregate_attainment(&rows.questions, &rows.marks, &assessed);

    let mut per_band: BTreeMap<GradeBand, Vec<f64>> = BTreeMap::new();
    for student in &students {
        per_band
            .entry(GradeBand::classify(student.percentage))
            .or_default()
            .push(student.percentage);
    }

    GradeBand::all()
        .into_iter()
        .map(|band| {
            let percentages = per_band.get(&band).map(|v| v.as_slice()).unwrap_or(&[]);
            GradeBandSummary {
                band,
                count: percentages.len(),
                mean_percentage: metrics::mean(percentages).map(round2),
            }
        })
        .collect()
}

/// Generate the course report for one offering: the CLO report's
/// statistics merged with enrollment, component, and grade data.
pub fn generate_course_report(
    store: &dyn Store,
    offering_id: OfferingId,
    options: &ReportOptions,
) -> EngineResult<CourseReport> {
    let rows = fetch_offering_rows(store, offering_id)?;
    let mappings = store.mappings_for_course(rows.course.id)?;
    let plo_codes: BTreeMap<PloId, String> = store
        .plos_for_degree(rows.course.degree_id)?
        .into_iter()
        .map(|p| (p.id, p.code))
        .collect();

    let computations = compute_clo_summaries(&rows);
    // Detail blocks belong to the CLO report; the course report keeps
    // outcome summaries only.
    let summary_options = ReportOptions {
        include_students: false,
        include_components: false,
        ..options.clone()
    };

    Ok(CourseReport {
        report_type: ReportType::Course,
        generated_at: Utc::now(),
        enrollment: enrollment_statistics(&rows.enrollments),
        overall_statistics: overall_from_clo(&computations),
        outcomes: clo_outcome_entries(&rows, &computations, &mappings, &plo_codes, &summary_options),
        components: component_summaries(&rows),
        grade_distribution: grade_distribution(&rows),
        offering: offering_identity(&rows),
    })
}

/// Generate the program report for one degree: the PLO rollup merged
/// with course, student, PEO, and action-plan data.
pub fn generate_program_report(
    store: &dyn Store,
    degree_id: DegreeId,
    options: &ReportOptions,
) -> EngineResult<ProgramReport> {
    let degree = store.degree(degree_id)?.ok_or(EngineError::NotFound {
        entity: "degree",
        id: degree_id,
    })?;

    let (outcomes, overall_statistics) =
        assemble_plo_outcomes(store, degree_id, None, options)?;

    let courses = store.courses_for_degree(degree_id)?;
    let offerings = store.offerings_for_degree(degree_id)?;
    let students = store.students_for_degree(degree_id)?;
    let mut peos = store.peos_for_degree(degree_id)?;
    peos.sort_by_key(|p| p.id);

    let mut plans = store.action_plans_for_degree(degree_id)?;
    plans.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
    plans.truncate(options.action_plan_limit);

    let active: Vec<_> = students.iter().filter(|s| s.is_active).collect();
    let sgpas: Vec<f64> = active.iter().filter_map(|s| s.sgpa).collect();
    let cgpas: Vec<f64> = active.iter().filter_map(|s| s.cgpa).collect();

    Ok(ProgramReport {
        report_type: ReportType::Program,
        generated_at: Utc::now(),
        degree: DegreeIdentity {
            degree_id: degree.id,
            code: degree.code,
            title: degree.title,
        },
        overall_statistics,
        outcomes,
        courses: CourseStatistics {
            course_count: courses.len(),
            offering_count: offerings.len(),
            total_credit_hours: courses.iter().map(|c| c.credit_hours).sum(),
        },
        students: StudentStatistics {
            active_students: active.len(),
            mean_sgpa: metrics::mean(&sgpas).map(round2),
            mean_cgpa: metrics::mean(&cgpas).map(round2),
        },
        peos: peos
            .into_iter()
            .map(|p| PeoEntry {
                peo_id: p.id,
                code: p.code,
                description: p.description,
            })
            .collect(),
        action_plans: plans
            .into_iter()
            .map(|p| ActionPlanEntry {
                plan_id: p.id,
                title: p.title,
                description: p.description,
                created_on: p.created_on,
            })
            .collect(),
    })
}

/// Convenience wrappers returning the format-agnostic [`Report`].
pub fn clo_report(
    store: &dyn Store,
    offering_id: OfferingId,
    options: &ReportOptions,
) -> EngineResult<Report> {
    generate_clo_report(store, offering_id, options).map(Report::Clo)
}

pub fn plo_report(
    store: &dyn Store,
    degree_id: DegreeId,
    session: Option<SessionId>,
    options: &ReportOptions,
) -> EngineResult<Report> {
    generate_plo_report(store, degree_id, session, options).map(Report::Plo)
}

pub fn course_report(
    store: &dyn Store,
    offering_id: OfferingId,
    options: &ReportOptions,
) -> EngineResult<Report> {
    generate_course_report(store, offering_id, options).map(Report::Course)
}

pub fn program_report(
    store: &dyn Store,
    degree_id: DegreeId,
    options: &ReportOptions,
) -> EngineResult<Report> {
    generate_program_report(store, degree_id, options).map(Report::Program)
}
