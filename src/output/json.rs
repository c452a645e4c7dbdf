//! JSON output formatter

use super::{Formatter, Record};

/// Formatter for JSON output, one compact object per line
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render(&self, record: &dyn Record) -> String {
        // Value serialization only fails on non-string map keys
        serde_json::to_string(&record.to_json()).unwrap_or_else(|e| {
            log::warn!("Error serializing record to JSON: {}", e);
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::FileRecord;

    #[test]
    fn test_json_omits_empty_fields() {
        let record = FileRecord {
            group: "infra".to_string(),
            project: "web".to_string(),
            branch: Some("main".to_string()),
            tag: None,
            path: "src/lib.rs".to_string(),
            lines: 0,
        };
        let rendered = JsonFormatter.render(&record);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["branch"], "main");
        assert!(value.get("tag").is_none());
        assert!(value.get("lines").is_none());
        assert!(!rendered.contains('\n'));
    }
}
