//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "layout-export.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing layout-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your service URL", self.output);
                println!("  2. Set LAYOUT_EXPORT_TOKEN in your environment or a .env file");
                println!("  3. Validate configuration: layout-export validate-config");
                println!("  4. Run export: layout-export export --format PNG --layout diagram.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(1)
            }
        }
    }

    fn generate_config() -> String {
        r#"# layout-export configuration

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[service]
# Endpoint issuing signed upload/poll URLs for an export
configuration_url = "https://export.example.com/layout-export/config"
# Bearer token sent to the configuration endpoint
api_token = "${LAYOUT_EXPORT_TOKEN}"
timeout_seconds = 30
connect_timeout_seconds = 10

[export]
# Sleep between result-list polls
result_poll_interval_ms = 2500
# Sleep between error-list polls
error_poll_interval_ms = 15000
# Give up polling after this many seconds (0 = never)
poll_timeout_seconds = 600

[resources]
# Relative icon URLs are resolved against this base before export
# icon_base_url = "https://static.example.com/icons/"

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_parses() {
        let config: AppConfig = toml::from_str(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.export.result_poll_interval_ms, 2500);
        assert_eq!(config.export.error_poll_interval_ms, 15000);
        assert!(config.resources.icon_base_url.is_none());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("layout-export.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[service]"));
    }
}
