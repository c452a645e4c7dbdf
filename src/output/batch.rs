//! Per-item outcomes and tallies of best-effort batches

use super::Record;

/// `name,ok` or `name,Fail <error>`
#[derive(Debug, Clone)]
pub struct OutcomeRecord {
    pub name: String,
    pub status: String,
}

impl OutcomeRecord {
    pub fn ok(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: "ok".to_string(),
        }
    }

    pub fn failed(name: &str, err: impl std::fmt::Display) -> Self {
        Self {
            name: name.to_string(),
            status: format!("Fail {}", err),
        }
    }
}

impl Record for OutcomeRecord {
    fn fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.status.clone()]
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "name": self.name, "status": self.status })
    }
}

/// `label,count`
#[derive(Debug, Clone)]
pub struct TallyRecord {
    pub label: &'static str,
    pub count: usize,
}

impl TallyRecord {
    pub fn new(label: &'static str, count: usize) -> Self {
        Self { label, count }
    }
}

impl Record for TallyRecord {
    fn fields(&self) -> Vec<String> {
        vec![self.label.to_string(), self.count.to_string()]
    }

    fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert(self.label.to_string(), self.count.into());
        serde_json::Value::Object(object)
    }
}
