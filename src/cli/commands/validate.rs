//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the layout-export configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded file is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Configuration Service: {}", config.service.configuration_url);
        println!(
            "  API Token: {}",
            if config.service.api_token.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!(
            "  Result Poll Interval: {} ms",
            config.export.result_poll_interval_ms
        );
        println!(
            "  Error Poll Interval: {} ms",
            config.export.error_poll_interval_ms
        );
        if config.export.poll_timeout_seconds == 0 {
            println!("  Poll Timeout: none");
        } else {
            println!("  Poll Timeout: {}s", config.export.poll_timeout_seconds);
        }
        println!(
            "  Icon Base URL: {}",
            config.resources.icon_base_url.as_deref().unwrap_or("(none)")
        );
        println!();
        Ok(0)
    }
}
