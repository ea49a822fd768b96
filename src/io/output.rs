//! Output format selection and the writer seam.

use std::io::Write;

use crate::io::writers::{CsvWriter, JsonWriter, MarkdownWriter, TerminalWriter};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON document
    Json,
    /// Markdown tables
    Markdown,
    /// Outcome rows (CLO/PLO level)
    Csv,
    /// Colored terminal summary
    Terminal,
}

/// Serializes an assembled report to some destination. The engine
/// guarantees the document; writers only render it.
pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    output: Box<dyn Write + 'a>,
    format: OutputFormat,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(output)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(output)),
        OutputFormat::Csv => Box::new(CsvWriter::new(output)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}
