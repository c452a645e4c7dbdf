//! Group data models

use serde::{Deserialize, Serialize};

use crate::gitlab::traits::GitlabResource;

/// Group data from GitLab API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

impl GitlabResource for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /groups`
#[derive(Serialize, Debug)]
pub(crate) struct CreateGroup<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub visibility: &'a str,
}
