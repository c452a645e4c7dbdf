//! Plain output formatter

use super::{Formatter, Record};

/// Fields joined with `:` on a single line
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn render(&self, record: &dyn Record) -> String {
        record.fields().join(":")
    }
}
