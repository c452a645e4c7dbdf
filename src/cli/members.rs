//! Membership command arguments

use clap::Parser;

use super::common::AccessArg;

/// Arguments for 'add-member'
#[derive(Parser, Debug)]
pub struct AddMemberArgs {
    /// Regex the project name must match
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Username to add
    #[arg(short = 'U', long)]
    pub username: String,

    /// Access level granted on each project
    #[arg(short = 'L', long, value_enum, default_value_t = AccessArg::Reporter)]
    pub access: AccessArg,
}

/// Arguments for 'replace-owners'
#[derive(Parser, Debug)]
pub struct ReplaceOwnersArgs {
    /// Regex the project name must match
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Usernames that become the only owners
    #[arg(short = 'o', long, value_delimiter = ',', required = true)]
    pub owners: Vec<String>,
}
