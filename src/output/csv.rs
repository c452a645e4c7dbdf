//! CSV output formatter

use super::{Formatter, Record};

/// Formatter for CSV output, one record per line, no header
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn render(&self, record: &dyn Record) -> String {
        record
            .fields()
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutcomeRecord;

    #[test]
    fn test_escape_csv_simple() {
        assert_eq!(escape_csv("simple"), "simple");
    }

    #[test]
    fn test_escape_csv_with_comma() {
        assert_eq!(escape_csv("has,comma"), "\"has,comma\"");
    }

    #[test]
    fn test_escape_csv_with_quotes() {
        assert_eq!(escape_csv("has\"quote"), "\"has\"\"quote\"");
    }

    #[test]
    fn test_escape_csv_with_newline() {
        assert_eq!(escape_csv("has\nnewline"), "\"has\nnewline\"");
    }

    #[test]
    fn test_escape_csv_empty() {
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_render_escapes_each_field() {
        let record = OutcomeRecord::failed("web", "API error (status 409): name, taken");
        assert_eq!(
            CsvFormatter.render(&record),
            "web,\"Fail API error (status 409): name, taken\""
        );
    }
}
