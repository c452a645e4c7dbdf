//! Settings resolution from multiple sources

use log::debug;

use crate::cli::Cli;
use crate::config::{defaults, settings as settings_config};
use crate::error::{GitlabError, Result};

use super::models::FileSettings;

/// Effective connection settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub private_token: String,
    pub trusted_certificates: Vec<String>,
}

impl Settings {
    /// Resolve each value from:
    /// 1. CLI flag or its environment variable
    /// 2. config file
    /// 3. built-in default
    ///
    /// There is no default token; a token missing everywhere is an error.
    pub fn resolve(cli: &Cli, file: FileSettings) -> Result<Self> {
        let api_url = match (&cli.api_url, file.gitlab.api_url) {
            (Some(url), _) => {
                debug!("Using API URL from CLI/env: {}", url);
                url.clone()
            }
            (None, Some(url)) => {
                debug!("Using API URL from config file: {}", url);
                url
            }
            (None, None) => defaults::API_URL.to_string(),
        };

        let private_token = cli
            .private_token
            .clone()
            .or(file.gitlab.private_token)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                GitlabError::Config(format!(
                    "no private token given (use --private-token, {} or the config file)",
                    settings_config::ENV_PRIVATE_TOKEN
                ))
            })?;

        let trusted_certificates = if cli.trusted_certificates.is_empty() {
            file.trusted_certificates
        } else {
            cli.trusted_certificates.clone()
        };

        Ok(Self {
            api_url,
            private_token,
            trusted_certificates,
        })
    }
}
