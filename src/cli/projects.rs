//! Project creation and removal arguments

use std::path::PathBuf;

use clap::Parser;

/// Arguments for 'create-projects'
#[derive(Parser, Debug)]
pub struct CreateProjectsArgs {
    /// Project names to create in --group
    pub names: Vec<String>,

    /// Group the projects belong to (created when missing)
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Usernames added as maintainers of every created project
    #[arg(short = 'o', long, value_delimiter = ',')]
    pub owners: Vec<String>,

    /// CSV file with 'group,project' rows
    #[arg(short = 'f', long)]
    pub from: Option<PathBuf>,
}

/// Arguments for 'remove-projects'
#[derive(Parser, Debug)]
pub struct RemoveProjectsArgs {
    /// Project names to remove
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Group the projects belong to
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
