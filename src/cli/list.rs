//! Listing command arguments

use clap::Parser;

use super::common::OutputFormat;

/// Arguments for 'list-groups'
#[derive(Parser, Debug)]
pub struct ListGroupsArgs {
    /// Regex the group name must match
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

/// Arguments for 'list-projects'
#[derive(Parser, Debug)]
pub struct ListProjectsArgs {
    /// Regex the group name must match
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Regex the project name must match
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

/// Arguments for 'list-files'
#[derive(Parser, Debug)]
pub struct ListFilesArgs {
    /// Regex the group name must match
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Regex the project name must match
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Regex the branch name must match; tags are skipped unless --tag is also given
    #[arg(long)]
    pub branch: Option<String>,

    /// Regex the tag name must match; branches are skipped unless --branch is also given
    #[arg(long)]
    pub tag: Option<String>,

    /// Regex the file path must match
    #[arg(short = 'f', long)]
    pub file: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Download each listed file and report its line count
    #[arg(short = 'l', long, default_value_t = false)]
    pub count_lines: bool,
}
