//! Project listing output

use chrono::DateTime;
use serde::Serialize;

use super::Record;
use crate::gitlab::Project;

/// `visibility,path_with_namespace,id,created`
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    pub visibility: String,
    pub path_with_namespace: String,
    pub id: u64,
    /// Creation date as `YYYY/MM/DD`, empty when unknown
    pub created: String,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            visibility: project.visibility.clone().unwrap_or_default(),
            path_with_namespace: project.path_with_namespace.clone(),
            id: project.id,
            created: project
                .created_at
                .as_deref()
                .map(format_created)
                .unwrap_or_default(),
        }
    }
}

/// `2021-03-04T10:20:30Z` -> `2021/03/04`; unparseable values pass through
fn format_created(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

impl Record for ProjectRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.visibility.clone(),
            self.path_with_namespace.clone(),
            self.id.to_string(),
            self.created.clone(),
        ]
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
