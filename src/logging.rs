//! Log setup: `log` facade backed by `env_logger`

use std::fs::OpenOptions;
use std::io::Write;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

use crate::cli::LogFormat;
use crate::config::defaults;
use crate::error::{GitlabError, Result};

/// Render one log line (without newline) in the selected format
pub fn format_line(format: LogFormat, level: Level, target: &str, message: &str) -> String {
    match format {
        LogFormat::Dev => format!("{:<5} {}", level, message),
        LogFormat::Log => format!(
            "level={} target={} msg={}",
            level.as_str().to_lowercase(),
            target,
            logfmt_value(message)
        ),
        LogFormat::Json => serde_json::json!({
            "level": level.as_str().to_lowercase(),
            "target": target,
            "message": message,
        })
        .to_string(),
        LogFormat::Cli => format!("{} {}", level_marker(level), message),
    }
}

/// Quote a logfmt value when it contains spaces, quotes or `=`
fn logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=']) {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Error => "✗",
        Level::Warn => "!",
        Level::Info => "•",
        Level::Debug | Level::Trace => "·",
    }
}

fn default_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        defaults::LOG_LEVEL.parse().unwrap_or(LevelFilter::Warn)
    }
}

/// Install the global logger
///
/// `destination` is empty for stderr, `-` for stdout, otherwise a file that
/// is appended to. `RUST_LOG` overrides the level chosen by `debug`.
pub fn init(format: LogFormat, destination: &str, debug: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(default_level(debug))
        .parse_default_env()
        .format(move |buf, record| {
            let line = format_line(
                format,
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{}", line)
        });

    match destination {
        "" => {
            builder.target(Target::Stderr);
        }
        "-" => {
            builder.target(Target::Stdout);
        }
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    GitlabError::Config(format!("Failed to open log file {}: {}", path, e))
                })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder
        .try_init()
        .map_err(|e| GitlabError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_format() {
        assert_eq!(
            format_line(LogFormat::Dev, Level::Info, "gitlab_api_client", "Created project"),
            "INFO  Created project"
        );
    }

    #[test]
    fn test_logfmt_quotes_messages_with_spaces() {
        assert_eq!(
            format_line(LogFormat::Log, Level::Warn, "app", "two words"),
            r#"level=warn target=app msg="two words""#
        );
        assert_eq!(
            format_line(LogFormat::Log, Level::Debug, "app", "single"),
            "level=debug target=app msg=single"
        );
    }

    #[test]
    fn test_json_format_is_one_object() {
        let line = format_line(LogFormat::Json, Level::Error, "app", "boom \"x\"");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "error");
        assert_eq!(value["target"], "app");
        assert_eq!(value["message"], "boom \"x\"");
    }

    #[test]
    fn test_cli_format_uses_marker() {
        assert_eq!(
            format_line(LogFormat::Cli, Level::Error, "app", "failed"),
            "✗ failed"
        );
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::Debug);
        assert_eq!(default_level(false), LevelFilter::Warn);
    }

    #[test]
    fn test_unwritable_log_file_is_config_error() {
        let err = init(LogFormat::Dev, "/nonexistent-dir/app.log", false).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
