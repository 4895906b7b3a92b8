//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output for interactive runs
//! - JSON-formatted log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use layout_export::logging::init_logging;
//! use layout_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export attempt
///
/// # Example
///
/// ```no_run
/// use layout_export::log_export_start;
/// use layout_export::domain::FormatName;
///
/// let format = FormatName::new("PNG").unwrap();
/// log_export_start!(&format, false);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($format:expr, $has_overrides:expr) => {
        tracing::info!(
            format = %$format,
            has_overrides = $has_overrides,
            "Starting export"
        );
    };
}

/// Log the settlement of an export attempt
///
/// # Example
///
/// ```no_run
/// use layout_export::log_export_settled;
/// use layout_export::domain::{FormatName, JobId};
///
/// let format = FormatName::new("PNG").unwrap();
/// let job_id = JobId::new("job-1").unwrap();
/// log_export_settled!(&format, &job_id, "success");
/// ```
#[macro_export]
macro_rules! log_export_settled {
    ($format:expr, $job_id:expr, $result:expr) => {
        tracing::info!(
            format = %$format,
            job_id = %$job_id,
            result = $result,
            "Export settled"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use layout_export::log_error_with_context;
/// use layout_export::domain::ExportError;
///
/// let error = ExportError::Configuration("missing service url".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{ExportError, FormatName, JobId};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let format = FormatName::new("PNG").unwrap();
        let job_id = JobId::new("job-1").unwrap();
        crate::log_export_start!(&format, true);
        crate::log_export_settled!(&format, &job_id, "success");
        crate::log_error_with_context!(&ExportError::Other("boom".to_string()), "test");
    }
}
