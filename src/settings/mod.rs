//! Settings module
//!
//! Connection settings come from CLI flags (or their environment
//! variables), then the YAML config file, then built-in defaults.

mod models;
mod resolve;
mod store;

pub use models::{FileSettings, GitlabSection};
pub use resolve::Settings;
pub use store::SettingsStore;
