//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for layout-export using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// layout-export - Export diagram layouts through a signed-URL service
#[derive(Parser, Debug)]
#[command(name = "layout-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "layout-export.toml", env = "LAYOUT_EXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LAYOUT_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a layout file in the requested format
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Log level and logging section to start logging with
    ///
    /// `--log-level` wins over `application.log_level`. The configuration
    /// file is consulted for every command except `init`; when it cannot be
    /// loaded, logging falls back to console only and the command itself
    /// reports the configuration error.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = match self.command {
            Commands::Init(_) => None,
            _ => load_config(&self.config).ok(),
        };

        match config {
            Some(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            None => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::console_only(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[application]\nlog_level = \"debug\"\n\n[service]\nconfiguration_url = \"https://export.example.com/config\"\n\n[logging]\nlocal_enabled = true\nlocal_path = \"/tmp/layout-export-logs\"\nlocal_rotation = \"hourly\""
        )
        .unwrap();
        file
    }

    #[test]
    fn test_logging_settings_from_config_file() {
        let file = config_file();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["layout-export", "--config", path.as_str(), "validate-config"]);

        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_rotation, "hourly");
    }

    #[test]
    fn test_logging_settings_flag_wins_over_config() {
        let file = config_file();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "layout-export",
            "--config",
            path.as_str(),
            "--log-level",
            "warn",
            "validate-config",
        ]);

        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "warn");
        assert!(logging.local_enabled);
    }

    #[test]
    fn test_logging_settings_fallback_without_config() {
        let cli = Cli::parse_from([
            "layout-export",
            "--config",
            "does-not-exist.toml",
            "validate-config",
        ]);

        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_logging_settings_init_skips_config() {
        let file = config_file();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["layout-export", "--config", path.as_str(), "init"]);

        let (_, logging) = cli.logging_settings();
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "layout-export",
            "export",
            "--format",
            "PNG",
            "--layout",
            "diagram.json",
        ]);
        assert_eq!(cli.config, "layout-export.toml");
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.format, "PNG");
                assert_eq!(args.layout, "diagram.json");
                assert!(args.set.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_with_settings() {
        let cli = Cli::parse_from([
            "layout-export",
            "export",
            "--format",
            "SVG",
            "--layout",
            "diagram.json",
            "--set",
            "a=b",
            "--set",
            "scale=2",
        ]);
        match cli.command {
            Commands::Export(args) => assert_eq!(args.set, vec!["a=b", "scale=2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_export_requires_format() {
        assert!(Cli::try_parse_from(["layout-export", "export", "--layout", "x.json"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["layout-export", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["layout-export", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["layout-export", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["layout-export", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "layout-export.toml");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
