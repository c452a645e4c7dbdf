//! Config file data models

use serde::{Deserialize, Serialize};

/// Top-level YAML config file
///
/// ```yaml
/// gitlab:
///   api-url: https://gitlab.example.com/api/v4/
///   private-token: secret
/// trusted-certificates:
///   - "@/etc/ssl/corp-ca.pem"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileSettings {
    #[serde(default)]
    pub gitlab: GitlabSection,
    /// Inline PEM blocks or `@path` references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trusted_certificates: Vec<String>,
}

/// `gitlab:` section of the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitlabSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_token: Option<String>,
}
