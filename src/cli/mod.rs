//! CLI argument parsing

mod common;
mod deploy_key;
mod list;
mod members;
mod projects;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::settings;

pub use common::{AccessArg, LogFormat, OutputFormat};
pub use deploy_key::DeployKeyArgs;
pub use list::{ListFilesArgs, ListGroupsArgs, ListProjectsArgs};
pub use members::{AddMemberArgs, ReplaceOwnersArgs};
pub use projects::{CreateProjectsArgs, RemoveProjectsArgs};

/// GitLab bulk administration CLI
#[derive(Parser, Debug)]
#[command(name = "gitlab-api-client")]
#[command(version)]
#[command(
    about = "Bulk administration of GitLab groups, projects, members and deploy keys",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: ~/.gitlab-api-client.yaml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Extra trusted certificates: inline PEM or @file (repeatable)
    #[arg(
        long = "trusted-certificates",
        global = true,
        env = settings::ENV_TRUSTED_CERTIFICATES,
        value_delimiter = ',',
        hide_env_values = true
    )]
    pub trusted_certificates: Vec<String>,

    /// Log line format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Dev)]
    pub log_format: LogFormat,

    /// Log destination: empty for stderr, '-' for stdout, or a file to append to
    #[arg(long, global = true, default_value = "")]
    pub log_file: String,

    /// GitLab API URL, e.g. https://gitlab.example.com/api/v4/
    #[arg(short = 'u', long, global = true, env = settings::ENV_API_URL)]
    pub api_url: Option<String>,

    /// GitLab private token
    #[arg(
        short = 't',
        long,
        global = true,
        env = settings::ENV_PRIVATE_TOKEN,
        hide_env_values = true
    )]
    pub private_token: Option<String>,

    /// Batch mode: no spinners, no interactive prompts
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List groups
    ListGroups(ListGroupsArgs),

    /// List projects of every group
    ListProjects(ListProjectsArgs),

    /// List repository files of every branch and tag
    ListFiles(ListFilesArgs),

    /// Add a user to every public project
    #[command(visible_alias = "member-add")]
    AddMember(AddMemberArgs),

    /// Make the given users the only owners of matching projects
    ReplaceOwners(ReplaceOwnersArgs),

    /// Create projects in a group (skips existing ones)
    #[command(visible_alias = "create-project")]
    CreateProjects(CreateProjectsArgs),

    /// Remove projects from a group
    #[command(visible_alias = "remove-project")]
    RemoveProjects(RemoveProjectsArgs),

    /// Enable or disable a deploy key on every public project
    #[command(visible_alias = "deploy-key-projects")]
    DeployKey(DeployKeyArgs),
}

impl Command {
    /// Subcommand name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListGroups(_) => "list-groups",
            Command::ListProjects(_) => "list-projects",
            Command::ListFiles(_) => "list-files",
            Command::AddMember(_) => "add-member",
            Command::ReplaceOwners(_) => "replace-owners",
            Command::CreateProjects(_) => "create-projects",
            Command::RemoveProjects(_) => "remove-projects",
            Command::DeployKey(_) => "deploy-key",
        }
    }
}
