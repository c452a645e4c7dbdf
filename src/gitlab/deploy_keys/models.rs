//! Deploy key data models

use serde::{Deserialize, Serialize};

use crate::gitlab::traits::GitlabResource;

/// Deploy key as returned by the project deploy key endpoints
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DeployKey {
    pub id: u64,
    pub title: String,
    /// Public key material
    pub key: String,
    #[serde(default)]
    pub can_push: Option<bool>,
}

impl GitlabResource for DeployKey {
    fn name(&self) -> &str {
        &self.title
    }
}

/// Body of `POST /projects/:id/deploy_keys`
#[derive(Serialize, Debug)]
pub(crate) struct AddDeployKey<'a> {
    pub key: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_push: Option<bool>,
}

impl<'a> From<&'a DeployKey> for AddDeployKey<'a> {
    fn from(key: &'a DeployKey) -> Self {
        Self {
            key: &key.key,
            title: &key.title,
            can_push: key.can_push,
        }
    }
}
