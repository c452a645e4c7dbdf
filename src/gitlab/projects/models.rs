//! Project data models

use serde::{Deserialize, Serialize};

use crate::gitlab::traits::GitlabResource;

/// Project data from GitLab API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_with_namespace: String,
    /// `public`, `internal` or `private`
    #[serde(default)]
    pub visibility: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub namespace: Option<Namespace>,
}

/// Owning namespace (group or user) of a project
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Namespace {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_path: Option<String>,
}

impl Project {
    pub fn is_public(&self) -> bool {
        self.visibility.as_deref() == Some("public")
    }
}

impl GitlabResource for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /projects`
#[derive(Serialize, Debug)]
pub(crate) struct CreateProject<'a> {
    pub name: &'a str,
    pub namespace_id: u64,
    pub visibility: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public() {
        let mut project: Project =
            serde_json::from_str(r#"{"id": 1, "name": "web", "visibility": "public"}"#).unwrap();
        assert!(project.is_public());

        project.visibility = Some("internal".to_string());
        assert!(!project.is_public());

        project.visibility = None;
        assert!(!project.is_public());
    }

    #[test]
    fn test_namespace_deserialize() {
        let project: Project = serde_json::from_str(
            r#"{"id": 1, "name": "web", "namespace": {"id": 4, "name": "infra", "full_path": "infra"}}"#,
        )
        .unwrap();
        assert_eq!(project.namespace.unwrap().name, "infra");
    }
}
