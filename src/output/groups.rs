//! Group listing output

use serde::Serialize;

use super::Record;
use crate::gitlab::Group;

/// `id,name`
#[derive(Debug, Clone, Serialize)]
pub struct GroupRecord {
    pub id: u64,
    pub name: String,
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
        }
    }
}

impl Record for GroupRecord {
    fn fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.id, "name": self.name })
    }
}
