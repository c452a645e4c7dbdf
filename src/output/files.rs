//! Repository file listing output

use serde::Serialize;

use super::Record;

/// `group,project,ref,path,lines`
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Zero unless line counting was requested
    #[serde(skip_serializing_if = "is_zero")]
    pub lines: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl FileRecord {
    /// Branch or tag name, whichever was scanned
    pub fn ref_name(&self) -> &str {
        self.branch
            .as_deref()
            .or(self.tag.as_deref())
            .unwrap_or_default()
    }
}

impl Record for FileRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.group.clone(),
            self.project.clone(),
            self.ref_name().to_string(),
            self.path.clone(),
            self.lines.to_string(),
        ]
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_use_tag_when_no_branch() {
        let record = FileRecord {
            group: "infra".to_string(),
            project: "web".to_string(),
            branch: None,
            tag: Some("v1.0".to_string()),
            path: "README.md".to_string(),
            lines: 12,
        };
        assert_eq!(
            record.fields(),
            vec!["infra", "web", "v1.0", "README.md", "12"]
        );
    }
}
