//! Config file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::settings as settings_config;
use crate::error::{GitlabError, Result};

use super::models::FileSettings;

/// Reads the YAML config file
pub struct SettingsStore {
    path: PathBuf,
    /// Whether the path was given explicitly (a missing file is then an error)
    explicit: bool,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Store for the default config file (~/.gitlab-api-client.yaml)
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
            explicit: false,
        }
    }

    /// Store for a file given with `--config`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    /// `--config` when given, the default file otherwise
    pub fn for_cli(config: Option<&Path>) -> Self {
        config.map_or_else(Self::new, Self::with_path)
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(settings_config::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config file
    ///
    /// A missing default file yields empty settings; a missing explicit
    /// file or malformed YAML is an error.
    pub fn load(&self) -> Result<FileSettings> {
        if !self.explicit && !self.path.exists() {
            debug!("No config file at {}", self.path.display());
            return Ok(FileSettings::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            GitlabError::Config(format!(
                "Failed to read config file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(FileSettings::default());
        }

        let settings = serde_yml::from_str(&content).map_err(|e| {
            GitlabError::Config(format!(
                "Failed to parse config file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Loaded config file {}", self.path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore {
            path: dir.path().join("absent.yaml"),
            explicit: false,
        };
        assert_eq!(store.load().unwrap(), FileSettings::default());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::with_path(dir.path().join("absent.yaml"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, GitlabError::Config(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_yaml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "gitlab: [unclosed").unwrap();

        let err = SettingsStore::with_path(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "gitlab:\n  api-url: https://git.example.com/api/v4/\n").unwrap();

        let settings = SettingsStore::with_path(&path).load().unwrap();
        assert_eq!(
            settings.gitlab.api_url.as_deref(),
            Some("https://git.example.com/api/v4/")
        );
    }

    #[test]
    fn test_empty_file_is_empty_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(
            SettingsStore::with_path(&path).load().unwrap(),
            FileSettings::default()
        );
    }
}
