mod csv;
mod json;
mod markdown;
mod terminal;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::core::AttainmentStatus;

/// "-" for a statistic with no data, two decimals otherwise.
pub(crate) fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn fmt_status(status: Option<AttainmentStatus>) -> &'static str {
    status.map_or("No Data", |s| s.label())
}
