//! Outcome-row CSV export.
//!
//! Contract: header `Code,Description,Target,Average Attainment,Status`,
//! one data row per outcome, fields containing commas, quotes, or
//! newlines double-quote-escaped. A null average is an empty field and
//! a null status is `No Data`, so missing data stays distinguishable
//! from a failing outcome.

use std::io::Write;

use crate::attainment::clo::CloAttainmentSummary;
use crate::attainment::rollup::PloAttainmentSummary;
use crate::io::output::ReportWriter;
use crate::io::writers::fmt_status;
use crate::report::Report;

pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_row(
        &mut self,
        code: &str,
        description: &str,
        target: f64,
        average: Option<f64>,
        status: &str,
    ) -> anyhow::Result<()> {
        let average = average.map_or(String::new(), |a| format!("{a:.2}"));
        writeln!(
            self.writer,
            "{},{},{},{},{}",
            escape(code),
            escape(description),
            escape(&format!("{target:.2}")),
            escape(&average),
            escape(status),
        )?;
        Ok(())
    }

    fn write_clo_rows(&mut self, summaries: Vec<&CloAttainmentSummary>) -> anyhow::Result<()> {
        for s in summaries {
            self.write_row(
                &s.code,
                &s.description,
                s.target_attainment,
                s.average_attainment,
                fmt_status(s.attainment_status),
            )?;
        }
        Ok(())
    }

    fn write_plo_rows(&mut self, summaries: Vec<&PloAttainmentSummary>) -> anyhow::Result<()> {
        for s in summaries {
            self.write_row(
                &s.code,
                &s.description,
                s.target_attainment,
                s.average_attainment,
                fmt_status(s.attainment_status),
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for CsvWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Code,Description,Target,Average Attainment,Status"
        )?;
        match report {
            Report::Clo(r) => self.write_clo_rows(r.outcomes.iter().map(|o| &o.summary).collect()),
            Report::Course(r) => {
                self.write_clo_rows(r.outcomes.iter().map(|o| &o.summary).collect())
            }
            Report::Plo(r) => self.write_plo_rows(r.outcomes.iter().map(|o| &o.summary).collect()),
            Report::Program(r) => {
                self.write_plo_rows(r.outcomes.iter().map(|o| &o.summary).collect())
            }
        }
    }
}

/// Standard CSV quoting: wrap when the field carries a comma, quote,
/// or newline; double any embedded quotes.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
