//! Configuration management.
//!
//! TOML-based configuration loading, parsing and validation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use layout_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("layout-export.toml")?;
//! println!("Configuration service: {}", config.service.configuration_url);
//! println!("Result poll: {} ms", config.export.result_poll_interval_ms);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! configuration_url = "https://export.example.com/layout-export/config"
//! api_token = "${LAYOUT_EXPORT_TOKEN}"
//!
//! [export]
//! result_poll_interval_ms = 2500
//! error_poll_interval_ms = 15000
//! poll_timeout_seconds = 600
//!
//! [resources]
//! icon_base_url = "https://static.example.com/icons/"
//! ```
//!
//! `${VAR_NAME}` placeholders are substituted from the environment, and
//! `LAYOUT_EXPORT_<SECTION>_<KEY>` variables override individual values.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    AppConfig, ApplicationConfig, ExportConfig, LoggingConfig, ResourcesConfig, ServiceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
