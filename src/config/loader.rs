//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use super::secret_string;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "LAYOUT_EXPORT_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (LAYOUT_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] if the file cannot be read, a
/// referenced environment variable is missing, parsing fails or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use layout_export::config::load_config;
///
/// let config = load_config("layout-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying the same substitution, overrides and
/// validation as [`load_config`]
///
/// # Errors
///
/// See [`load_config`].
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ExportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ExportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|name| name == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the LAYOUT_EXPORT_* prefix
///
/// Variables follow the pattern LAYOUT_EXPORT_<SECTION>_<KEY>, for example
/// LAYOUT_EXPORT_SERVICE_CONFIGURATION_URL. Unparseable numbers are ignored.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env_override("SERVICE_CONFIGURATION_URL") {
        config.service.configuration_url = val;
    }
    if let Some(val) = env_override("SERVICE_API_TOKEN") {
        config.service.api_token = Some(secret_string(val));
    }
    if let Some(Ok(seconds)) = env_override("SERVICE_TIMEOUT_SECONDS").map(|v| v.parse::<u64>()) {
        config.service.timeout_seconds = seconds;
    }

    if let Some(Ok(ms)) = env_override("EXPORT_RESULT_POLL_INTERVAL_MS").map(|v| v.parse::<u64>()) {
        config.export.result_poll_interval_ms = ms;
    }
    if let Some(Ok(ms)) = env_override("EXPORT_ERROR_POLL_INTERVAL_MS").map(|v| v.parse::<u64>()) {
        config.export.error_poll_interval_ms = ms;
    }
    if let Some(Ok(seconds)) = env_override("EXPORT_POLL_TIMEOUT_SECONDS").map(|v| v.parse::<u64>()) {
        config.export.poll_timeout_seconds = seconds;
    }

    if let Some(val) = env_override("RESOURCES_ICON_BASE_URL") {
        config.resources.icon_base_url = Some(val);
    }

    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LOADER_TEST_TOKEN", "test_value");
        let input = "api_token = \"${LOADER_TEST_TOKEN}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"\n");
        std::env::remove_var("LOADER_TEST_TOKEN");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LOADER_MISSING_VAR");
        let input = "api_token = \"${LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# api_token = \"${LOADER_COMMENTED_OUT}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[service]
configuration_url = "https://export.example.com/config"

[export]
poll_timeout_seconds = 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(
            config.service.configuration_url,
            "https://export.example.com/config"
        );
        assert_eq!(config.export.result_poll_interval_ms, 2500);
        assert_eq!(config.export.poll_timeout_seconds, 0);
    }
}
