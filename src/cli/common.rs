//! Common CLI types shared across commands

use clap::ValueEnum;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values (default)
    #[default]
    Csv,
    /// Colon-joined single line; sent to the debug log when --debug is set
    Plain,
    /// One JSON object per line
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// JSON object per line
    Json,
    /// logfmt key=value pairs
    Log,
    /// Level and message, human oriented (default)
    #[default]
    Dev,
    /// Bare message with a level marker
    Cli,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Log => write!(f, "log"),
            LogFormat::Dev => write!(f, "dev"),
            LogFormat::Cli => write!(f, "cli"),
        }
    }
}

/// Project access level accepted by `add-member`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AccessArg {
    /// Reporter (20)
    #[default]
    #[value(alias = "20")]
    Reporter,
    /// Maintainer (40)
    #[value(alias = "40", alias = "master")]
    Maintainer,
    /// Owner (50)
    #[value(alias = "50")]
    Owner,
}
