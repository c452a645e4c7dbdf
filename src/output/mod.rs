//! Output formatting module
//!
//! Every command result is a flat [`Record`]: an ordered list of string
//! fields plus a JSON view. The format is chosen once per invocation and
//! each record is rendered as one line.

mod batch;
mod csv;
mod files;
mod groups;
mod json;
mod plain;
mod projects;

use log::debug;

use crate::cli::OutputFormat;

pub use self::batch::{OutcomeRecord, TallyRecord};
pub use self::csv::CsvFormatter;
pub use self::files::FileRecord;
pub use self::groups::GroupRecord;
pub use self::json::JsonFormatter;
pub use self::plain::PlainFormatter;
pub use self::projects::ProjectRecord;

/// A flat result row
pub trait Record {
    /// Ordered fields, as written to CSV or plain output
    fn fields(&self) -> Vec<String>;

    /// JSON object for `--format json`
    fn to_json(&self) -> serde_json::Value;
}

/// Trait for output formatters
pub trait Formatter: Send + Sync {
    /// Render one record as a single line (without newline)
    fn render(&self, record: &dyn Record) -> String;
}

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Plain => Box::new(PlainFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Writes rendered records to stdout
///
/// Plain output is routed to the debug log when debugging, so it does not
/// interleave with log lines on the terminal.
pub struct Printer {
    formatter: Box<dyn Formatter>,
    to_log: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, debug: bool) -> Self {
        Self {
            formatter: formatter_for(format),
            to_log: debug && format == OutputFormat::Plain,
        }
    }

    pub fn emit(&self, record: &dyn Record) {
        let line = self.formatter.render(record);
        if self.to_log {
            debug!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn emit_all<R: Record>(&self, records: &[R]) {
        for record in records {
            self.emit(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_for_each_format() {
        let record = GroupRecord {
            id: 7,
            name: "infra".to_string(),
        };
        assert_eq!(formatter_for(OutputFormat::Csv).render(&record), "7,infra");
        assert_eq!(formatter_for(OutputFormat::Plain).render(&record), "7:infra");
        assert_eq!(
            formatter_for(OutputFormat::Json).render(&record),
            r#"{"id":7,"name":"infra"}"#
        );
    }

    #[test]
    fn test_printer_routes_plain_to_log_only_when_debugging() {
        assert!(Printer::new(OutputFormat::Plain, true).to_log);
        assert!(!Printer::new(OutputFormat::Plain, false).to_log);
        assert!(!Printer::new(OutputFormat::Csv, true).to_log);
    }
}
