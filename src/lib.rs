//! gitlab-api-client - bulk administration of GitLab instances
//!
//! A CLI that walks the paginated GitLab REST API to list groups, projects
//! and repository files, and to apply bulk changes: adding members,
//! replacing owners, creating or removing projects and toggling deploy keys.
//!
//! # Example
//!
//! ```bash
//! # List groups as CSV
//! gitlab-api-client list-groups -u https://gitlab.example.com/api/v4/ -t $TOKEN
//!
//! # List projects of groups matching a pattern, as JSON
//! gitlab-api-client list-projects -g '^infra' -F json
//!
//! # Add a reporter to every public project
//! gitlab-api-client add-member -U jdoe -L reporter
//!
//! # Create projects from a CSV of group,project rows
//! gitlab-api-client create-projects --from projects.csv -o alice,bob
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod logging;
pub mod output;
pub mod settings;
pub mod ui;

pub use cli::{Cli, Command, LogFormat, OutputFormat};
pub use error::{GitlabError, Result, ResultExt};
pub use gitlab::{
    run_add_member_command, run_create_projects_command, run_deploy_key_command,
    run_list_files_command, run_list_groups_command, run_list_projects_command,
    run_remove_projects_command, run_replace_owners_command, GitlabClient, ListOptions,
    PageStream,
};
pub use settings::{Settings, SettingsStore};
