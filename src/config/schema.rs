//! Configuration schema types
//!
//! This module defines the TOML configuration structure.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export service endpoints and HTTP settings
    pub service: ServiceConfig,

    /// Poll cadences and timeout
    #[serde(default)]
    pub export: ExportConfig,

    /// Resource addressing for layout icons
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate()?;
        self.export.validate()?;
        self.resources.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint issuing save configurations (`POST {"format": ...}`)
    pub configuration_url: String,

    /// Bearer token for the configuration endpoint (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.configuration_url.is_empty() {
            return Err("service.configuration_url cannot be empty".to_string());
        }
        Url::parse(&self.configuration_url).map_err(|e| {
            format!(
                "Invalid service.configuration_url '{}': {e}",
                self.configuration_url
            )
        })?;

        if self.timeout_seconds == 0 {
            return Err("service.timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("service.connect_timeout_seconds must be > 0".to_string());
        }

        if let Some(token) = &self.api_token {
            use secrecy::ExposeSecret;
            if token.expose_secret().is_empty() {
                return Err("service.api_token is set but empty".to_string());
            }
        }
        Ok(())
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Sleep between result-list requests, in milliseconds
    #[serde(default = "default_result_poll_interval_ms")]
    pub result_poll_interval_ms: u64,

    /// Sleep between error-list requests, in milliseconds
    #[serde(default = "default_error_poll_interval_ms")]
    pub error_poll_interval_ms: u64,

    /// Give up polling after this many seconds (0 disables the timeout)
    #[serde(default = "default_poll_timeout_seconds")]
    pub poll_timeout_seconds: u64,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.result_poll_interval_ms == 0 {
            return Err("export.result_poll_interval_ms must be > 0".to_string());
        }
        if self.error_poll_interval_ms == 0 {
            return Err("export.error_poll_interval_ms must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            result_poll_interval_ms: default_result_poll_interval_ms(),
            error_poll_interval_ms: default_error_poll_interval_ms(),
            poll_timeout_seconds: default_poll_timeout_seconds(),
        }
    }
}

/// Resource addressing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Base URL icon references are resolved against before export
    #[serde(default)]
    pub icon_base_url: Option<String>,
}

impl ResourcesConfig {
    fn validate(&self) -> Result<(), String> {
        self.icon_base().map(|_| ())
    }

    /// Parsed icon base URL, if configured
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not an absolute URL.
    pub fn icon_base(&self) -> Result<Option<Url>, String> {
        self.icon_base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| format!("Invalid resources.icon_base_url '{raw}': {e}"))
            })
            .transpose()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }

    /// Console-only logging, used by the CLI before a config file is loaded
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_result_poll_interval_ms() -> u64 {
    2500
}

fn default_error_poll_interval_ms() -> u64 {
    15000
}

fn default_poll_timeout_seconds() -> u64 {
    600
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn service() -> ServiceConfig {
        ServiceConfig {
            configuration_url: "https://export.example.com/config".to_string(),
            api_token: None,
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_service_config_validation() {
        let mut config = service();
        assert!(config.validate().is_ok());

        config.configuration_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config = service();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config = service();
        config.api_token = Some(secret_string(String::new()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.result_poll_interval_ms, 2500);
        assert_eq!(config.error_poll_interval_ms, 15000);
        assert_eq!(config.poll_timeout_seconds, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_config_rejects_zero_interval() {
        let config = ExportConfig {
            result_poll_interval_ms: 0,
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resources_icon_base() {
        let mut config = ResourcesConfig::default();
        assert_eq!(config.icon_base().unwrap(), None);

        config.icon_base_url = Some("https://static.example.com/icons/".to_string());
        assert!(config.icon_base().unwrap().is_some());

        config.icon_base_url = Some("icons/".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_invalid_rotation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
