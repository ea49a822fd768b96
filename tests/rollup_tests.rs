mod common;

use attainmap::attainment::gap::GapTier;
use attainmap::config::ReportOptions;
use attainmap::core::AttainmentStatus;
use attainmap::report::assembler::generate_plo_report;
use common::DatasetBuilder;

/// Two CLOs mapped to PLO-1 with strengths 0.6 and 0.4 and averages
/// 76.67 and 50, rolled up end to end.
fn two_clo_store() -> attainmap::store::memory::InMemoryStore {
    DatasetBuilder::new()
        .degree(1, "BSCS")
        .session(1, "Fall 2024", (2024, 9, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .clo(1, 1, "CLO-1", 75.0)
        .clo(2, 1, "CLO-2", 75.0)
        .plo(1, 1, "PLO-1", 70.0)
        .mapping(1, 1, 0.6)
        .mapping(2, 1, 0.4)
        .component(1, 1, "Midterm")
        .question(1, 1, 1, 1, 10.0)
        .question(2, 1, 1, 1, 10.0)
        .question(3, 1, 1, 2, 10.0)
        .enroll(1, 1)
        .enroll(2, 1)
        .enroll(3, 1)
        .enroll(4, 1)
        .mark(1, 1, 8.0)
        .mark(1, 2, 8.0)
        .mark(2, 1, 6.0)
        .mark(2, 2, 6.0)
        .mark(3, 1, 9.0)
        .mark(3, 2, 9.0)
        .mark(4, 3, 5.0)
        .build()
}

#[test]
fn weighted_rollup_of_mapped_clos() {
    let store = two_clo_store();
    let report = generate_plo_report(&store, 1, None, &ReportOptions::default()).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    let entry = &report.outcomes[0];
    let summary = &entry.summary;

    // (76.67 * 0.6 + 50 * 0.4) / 1.0 = 66.0
    assert_eq!(summary.average_attainment, Some(66.0));
    assert_eq!(summary.attainment_status, Some(AttainmentStatus::NotAchieved));

    let gap = entry.gap.as_ref().unwrap();
    assert_eq!(gap.gap, 4.0);
    assert_eq!(gap.tier, GapTier::NearTarget);
}

#[test]
fn plo_students_are_deduplicated_not_summed() {
    // Students 1-3 assessed under CLO-1, student 4 under CLO-2; the
    // per-CLO totals sum to 4 and the union is also 4. Overlap case:
    // give student 1 marks under CLO-2 too and the union must stay 4.
    let store = DatasetBuilder::new()
        .degree(1, "BSCS")
        .session(1, "Fall 2024", (2024, 9, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .clo(1, 1, "CLO-1", 75.0)
        .clo(2, 1, "CLO-2", 75.0)
        .plo(1, 1, "PLO-1", 70.0)
        .mapping(1, 1, 0.5)
        .mapping(2, 1, 0.5)
        .component(1, 1, "Midterm")
        .question(1, 1, 1, 1, 10.0)
        .question(2, 1, 1, 2, 10.0)
        .enroll(1, 1)
        .enroll(2, 1)
        .enroll(3, 1)
        .enroll(4, 1)
        .mark(1, 1, 8.0)
        .mark(2, 1, 7.0)
        .mark(3, 1, 6.0)
        .mark(1, 2, 9.0)
        .mark(4, 2, 5.0)
        .build();

    let report = generate_plo_report(&store, 1, None, &ReportOptions::default()).unwrap();
    let summary = &report.outcomes[0].summary;

    // CLO-1 assessed {1,2,3}, CLO-2 assessed {1,4}: union is 4, sum is 5.
    assert_eq!(summary.total_students, 4);
}

#[test]
fn session_filter_restricts_contributions() {
    let store = DatasetBuilder::new()
        .degree(1, "BSCS")
        .session(1, "Fall 2024", (2024, 9, 1))
        .session(2, "Spring 2025", (2025, 2, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .offering(2, 1, 2)
        .clo(1, 1, "CLO-1", 75.0)
        .plo(1, 1, "PLO-1", 70.0)
        .mapping(1, 1, 1.0)
        .component(1, 1, "Quiz 1")
        .component(2, 2, "Quiz 1")
        .question(1, 1, 1, 1, 10.0)
        .question(2, 2, 2, 1, 10.0)
        .enroll(1, 1)
        .enroll(2, 2)
        .mark(1, 1, 9.0)
        .mark(2, 2, 5.0)
        .build();

    let all = generate_plo_report(&store, 1, None, &ReportOptions::default()).unwrap();
    assert_eq!(all.outcomes[0].summary.average_attainment, Some(70.0));
    assert!(all.session_filter.is_none());

    let fall = generate_plo_report(&store, 1, Some(1), &ReportOptions::default()).unwrap();
    assert_eq!(fall.outcomes[0].summary.average_attainment, Some(90.0));
    assert_eq!(fall.session_filter.as_ref().unwrap().name, "Fall 2024");

    let spring = generate_plo_report(&store, 1, Some(2), &ReportOptions::default()).unwrap();
    assert_eq!(spring.outcomes[0].summary.average_attainment, Some(50.0));
}

#[test]
fn contributing_courses_are_annotated() {
    let store = two_clo_store();
    let report = generate_plo_report(&store, 1, None, &ReportOptions::default()).unwrap();
    let courses = &report.outcomes[0].summary.contributing_courses;

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].course_code, "CS101");
    assert_eq!(courses[0].clo_code, "CLO-1");
    assert_eq!(courses[0].average_attainment, Some(76.67));
    assert_eq!(courses[0].mapping_strength, 0.6);
    assert_eq!(courses[1].clo_code, "CLO-2");
    assert_eq!(courses[1].average_attainment, Some(50.0));
}

#[test]
fn plo_without_any_data_is_null() {
    let store = DatasetBuilder::new()
        .degree(1, "BSCS")
        .session(1, "Fall 2024", (2024, 9, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .clo(1, 1, "CLO-1", 75.0)
        .plo(1, 1, "PLO-1", 70.0)
        .mapping(1, 1, 1.0)
        .build();

    let report = generate_plo_report(&store, 1, None, &ReportOptions::default()).unwrap();
    let summary = &report.outcomes[0].summary;

    assert_eq!(summary.average_attainment, None);
    assert_eq!(summary.attainment_status, None);
    assert_eq!(summary.total_students, 0);
    assert!(report.outcomes[0].gap.is_none());
}

#[test]
fn trend_series_is_chronological() {
    let store = DatasetBuilder::new()
        .degree(1, "BSCS")
        // Inserted out of order on purpose; trend must sort by start date.
        .session(2, "Spring 2025", (2025, 2, 1))
        .session(1, "Fall 2024", (2024, 9, 1))
        .course(1, 1, "CS101", 3.0)
        .offering(1, 1, 1)
        .offering(2, 1, 2)
        .clo(1, 1, "CLO-1", 75.0)
        .plo(1, 1, "PLO-1", 70.0)
        .mapping(1, 1, 1.0)
        .component(1, 1, "Quiz 1")
        .component(2, 2, "Quiz 1")
        .question(1, 1, 1, 1, 10.0)
        .question(2, 2, 2, 1, 10.0)
        .enroll(1, 1)
        .enroll(2, 2)
        .mark(1, 1, 6.0)
        .mark(2, 2, 8.0)
        .build();

    let options = ReportOptions {
        include_trend: true,
        ..Default::default()
    };
    let report = generate_plo_report(&store, 1, None, &options).unwrap();
    let trend = report.outcomes[0].trend.as_ref().unwrap();

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].session_name, "Fall 2024");
    assert_eq!(trend[0].average_attainment, Some(60.0));
    assert_eq!(trend[1].session_name, "Spring 2025");
    assert_eq!(trend[1].average_attainment, Some(80.0));
}
