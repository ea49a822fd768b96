use std::io::Write;

use crate::io::output::ReportWriter;
use crate::io::writers::{fmt_stat, fmt_status};
use crate::report::{
    CloOutcomeEntry, CloReport, CourseReport, OverallStatistics, PloOutcomeEntry, PloReport,
    ProgramReport, Report,
};

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        match report {
            Report::Clo(r) => self.write_clo_report(r),
            Report::Plo(r) => self.write_plo_report(r),
            Report::Course(r) => self.write_course_report(r),
            Report::Program(r) => self.write_program_report(r),
        }
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", report.report_type().label())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overall(&mut self, stats: &OverallStatistics) -> anyhow::Result<()> {
        writeln!(self.writer, "## Overall Statistics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total outcomes | {} |", stats.total_outcomes)?;
        writeln!(self.writer, "| Achieved | {} |", stats.outcomes_achieved)?;
        writeln!(
            self.writer,
            "| Not achieved | {} |",
            stats.outcomes_not_achieved
        )?;
        writeln!(
            self.writer,
            "| Without data | {} |",
            stats.outcomes_without_data
        )?;
        writeln!(
            self.writer,
            "| Mean attainment | {} |",
            fmt_stat(stats.mean_attainment)
        )?;
        writeln!(
            self.writer,
            "| Success rate | {} |",
            fmt_stat(stats.success_rate)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_clo_outcomes<'a>(
        &mut self,
        outcomes: impl Iterator<Item = &'a CloOutcomeEntry>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## Course Learning Outcomes")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Code | Students | Target | Average | Status | Gap | Tier |"
        )?;
        writeln!(
            self.writer,
            "|------|----------|--------|---------|--------|-----|------|"
        )?;
        for entry in outcomes {
            let s = &entry.summary;
            let (gap, tier) = entry
                .gap
                .as_ref()
                .map_or(("-".to_string(), "-"), |g| {
                    (format!("{:.2}", g.gap), g.tier.label())
                });
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} | {} | {} |",
                s.code,
                s.total_students,
                s.target_attainment,
                fmt_stat(s.average_attainment),
                fmt_status(s.attainment_status),
                gap,
                tier,
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_plo_outcomes<'a>(
        &mut self,
        outcomes: impl Iterator<Item = &'a PloOutcomeEntry>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## Program Learning Outcomes")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Code | Students | Courses | Target | Average | Status | Gap | Tier |"
        )?;
        writeln!(
            self.writer,
            "|------|----------|---------|--------|---------|--------|-----|------|"
        )?;
        for entry in outcomes {
            let s = &entry.summary;
            let (gap, tier) = entry
                .gap
                .as_ref()
                .map_or(("-".to_string(), "-"), |g| {
                    (format!("{:.2}", g.gap), g.tier.label())
                });
            writeln!(
                self.writer,
                "| {} | {} | {} | {:.2} | {} | {} | {} | {} |",
                s.code,
                s.total_students,
                s.contributing_courses.len(),
                s.target_attainment,
                fmt_stat(s.average_attainment),
                fmt_status(s.attainment_status),
                gap,
                tier,
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_clo_report(&mut self, report: &CloReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Offering: {} {} (section {}, {})",
            report.offering.course_code,
            report.offering.course_title,
            report.offering.section,
            report.offering.session_name
        )?;
        writeln!(self.writer)?;
        self.write_overall(&report.overall_statistics)?;
        self.write_clo_outcomes(report.outcomes.iter())
    }

    fn write_plo_report(&mut self, report: &PloReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Program: {} {}",
            report.degree.code, report.degree.title
        )?;
        if let Some(session) = &report.session_filter {
            writeln!(self.writer, "Session: {}", session.name)?;
        }
        writeln!(self.writer)?;
        self.write_overall(&report.overall_statistics)?;
        self.write_plo_outcomes(report.outcomes.iter())
    }

    fn write_course_report(&mut self, report: &CourseReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Offering: {} {} (section {}, {})",
            report.offering.course_code,
            report.offering.course_title,
            report.offering.section,
            report.offering.session_name
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Enrollment")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Status | Count |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Active | {} |", report.enrollment.active)?;
        writeln!(self.writer, "| Dropped | {} |", report.enrollment.dropped)?;
        writeln!(
            self.writer,
            "| Withdrawn | {} |",
            report.enrollment.withdrawn
        )?;
        writeln!(self.writer, "| Total | {} |", report.enrollment.total)?;
        writeln!(self.writer)?;

        self.write_overall(&report.overall_statistics)?;
        self.write_clo_outcomes(report.outcomes.iter())?;

        writeln!(self.writer, "## Assessment Components")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Component | Students | Possible | Average % | Min % | Max % |"
        )?;
        writeln!(
            self.writer,
            "|-----------|----------|----------|-----------|-------|-------|"
        )?;
        for c in report.components.iter() {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} | {} |",
                c.name,
                c.total_students,
                c.possible_marks,
                fmt_stat(c.average_percentage),
                fmt_stat(c.min_percentage),
                fmt_stat(c.max_percentage),
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Grade Distribution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Grade | Count | Mean % |")?;
        writeln!(self.writer, "|-------|-------|--------|")?;
        for g in &report.grade_distribution {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                g.band.label(),
                g.count,
                fmt_stat(g.mean_percentage),
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_program_report(&mut self, report: &ProgramReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Program: {} {}",
            report.degree.code, report.degree.title
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Program Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Courses | {} |", report.courses.course_count)?;
        writeln!(
            self.writer,
            "| Offerings | {} |",
            report.courses.offering_count
        )?;
        writeln!(
            self.writer,
            "| Credit hours | {:.1} |",
            report.courses.total_credit_hours
        )?;
        writeln!(
            self.writer,
            "| Active students | {} |",
            report.students.active_students
        )?;
        writeln!(
            self.writer,
            "| Mean SGPA | {} |",
            fmt_stat(report.students.mean_sgpa)
        )?;
        writeln!(
            self.writer,
            "| Mean CGPA | {} |",
            fmt_stat(report.students.mean_cgpa)
        )?;
        writeln!(self.writer)?;

        self.write_overall(&report.overall_statistics)?;
        self.write_plo_outcomes(report.outcomes.iter())?;

        if !report.peos.is_empty() {
            writeln!(self.writer, "## Program Educational Objectives")?;
            writeln!(self.writer)?;
            for peo in &report.peos {
                writeln!(self.writer, "- **{}**: {}", peo.code, peo.description)?;
            }
            writeln!(self.writer)?;
        }

        if !report.action_plans.is_empty() {
            writeln!(self.writer, "## Improvement Action Plans")?;
            writeln!(self.writer)?;
            for plan in &report.action_plans {
                writeln!(
                    self.writer,
                    "- {} ({}): {}",
                    plan.title, plan.created_on, plan.description
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}
