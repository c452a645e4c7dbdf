//! Deploy key command arguments

use clap::Parser;

/// Arguments for 'deploy-key'
#[derive(Parser, Debug)]
pub struct DeployKeyArgs {
    /// Project holding the reference deploy key
    #[arg(short = 'q', long)]
    pub project_id: u64,

    /// Id of the reference deploy key
    #[arg(short = 'k', long)]
    pub key_id: u64,

    /// Remove the key instead of adding it
    #[arg(short = 'd', long, default_value_t = false)]
    pub disabled: bool,

    /// Regex the project name must match
    #[arg(short = 'p', long)]
    pub project: Option<String>,
}
