use colored::*;

use crate::attainment::gap::GapTier;
use crate::core::AttainmentStatus;
use crate::io::output::ReportWriter;
use crate::io::writers::fmt_stat;
use crate::report::{OverallStatistics, Report};

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for TerminalWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        print_header(report);
        match report {
            Report::Clo(r) => {
                println!(
                    "Offering: {} {} (section {}, {})",
                    r.offering.course_code,
                    r.offering.course_title,
                    r.offering.section,
                    r.offering.session_name
                );
                print_overall(&r.overall_statistics);
                for entry in r.outcomes.iter() {
                    let s = &entry.summary;
                    println!(
                        "  {:<10} students {:>3}  target {:>6.2}  avg {:>7}  {}  {}",
                        s.code,
                        s.total_students,
                        s.target_attainment,
                        fmt_stat(s.average_attainment),
                        status_colored(s.attainment_status),
                        tier_colored(entry.gap.as_ref().map(|g| g.tier)),
                    );
                }
            }
            Report::Plo(r) => {
                println!("Program: {} {}", r.degree.code, r.degree.title);
                if let Some(session) = &r.session_filter {
                    println!("Session: {}", session.name);
                }
                print_overall(&r.overall_statistics);
                for entry in r.outcomes.iter() {
                    let s = &entry.summary;
                    println!(
                        "  {:<10} students {:>3}  courses {:>2}  target {:>6.2}  avg {:>7}  {}  {}",
                        s.code,
                        s.total_students,
                        s.contributing_courses.len(),
                        s.target_attainment,
                        fmt_stat(s.average_attainment),
                        status_colored(s.attainment_status),
                        tier_colored(entry.gap.as_ref().map(|g| g.tier)),
                    );
                }
            }
            Report::Course(r) => {
                println!(
                    "Offering: {} {} (section {}, {})",
                    r.offering.course_code,
                    r.offering.course_title,
                    r.offering.section,
                    r.offering.session_name
                );
                println!(
                    "Enrollment: {} active, {} dropped, {} withdrawn",
                    r.enrollment.active, r.enrollment.dropped, r.enrollment.withdrawn
                );
                print_overall(&r.overall_statistics);
                for g in &r.grade_distribution {
                    println!(
                        "  grade {:<2} count {:>3}  mean {:>7}",
                        g.band.label(),
                        g.count,
                        fmt_stat(g.mean_percentage)
                    );
                }
            }
            Report::Program(r) => {
                println!("Program: {} {}", r.degree.code, r.degree.title);
                println!(
                    "Courses: {} ({} offerings, {:.1} credit hours)",
                    r.courses.course_count, r.courses.offering_count, r.courses.total_credit_hours
                );
                println!(
                    "Students: {} active, mean SGPA {}, mean CGPA {}",
                    r.students.active_students,
                    fmt_stat(r.students.mean_sgpa),
                    fmt_stat(r.students.mean_cgpa)
                );
                print_overall(&r.overall_statistics);
                for entry in r.outcomes.iter() {
                    let s = &entry.summary;
                    println!(
                        "  {:<10} avg {:>7}  {}",
                        s.code,
                        fmt_stat(s.average_attainment),
                        status_colored(s.attainment_status),
                    );
                }
            }
        }
        println!();
        Ok(())
    }
}

fn print_header(report: &Report) {
    println!();
    println!("{}", "═══════════════════════════════════════════".cyan());
    println!("  {}", report.report_type().label().bold().cyan());
    println!("{}", "═══════════════════════════════════════════".cyan());
    println!(
        "Generated: {}",
        report.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

fn print_overall(stats: &OverallStatistics) {
    println!(
        "Outcomes: {} total, {} achieved, {} not achieved, {} without data",
        stats.total_outcomes,
        stats.outcomes_achieved,
        stats.outcomes_not_achieved,
        stats.outcomes_without_data
    );
    println!(
        "Mean attainment: {}   Success rate: {}",
        fmt_stat(stats.mean_attainment),
        fmt_stat(stats.success_rate)
    );
    println!();
}

fn status_colored(status: Option<AttainmentStatus>) -> ColoredString {
    match status {
        Some(AttainmentStatus::Achieved) => "Achieved".green(),
        Some(AttainmentStatus::NotAchieved) => "Not Achieved".red(),
        None => "No Data".dimmed(),
    }
}

fn tier_colored(tier: Option<GapTier>) -> ColoredString {
    match tier {
        Some(GapTier::Met) => "MET".green(),
        Some(GapTier::NearTarget) => "NEAR".yellow(),
        Some(GapTier::NeedsImprovement) => "IMPROVE".yellow().bold(),
        Some(GapTier::Critical) => "CRIT".red().bold(),
        None => "-".dimmed(),
    }
}
