//! Domain error types
//!
//! This module defines the error hierarchy shared by the orchestrator and its
//! collaborators. Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type
///
/// Every collaborator (configuration generator, storage transport, loaders)
/// reports failures through this type. When an export attempt fails, the
/// value is carried unchanged inside the outcome, so its `Display` text is the
/// reason a caller sees.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage or configuration-service transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Opaque reason reported by a collaborator
    #[error("{0}")]
    Other(String),
}

/// Transport-specific errors
///
/// Errors raised while talking to the configuration service or to the signed
/// storage URLs. These errors don't expose HTTP client types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Failed to reach the remote endpoint
    #[error("Failed to connect: {0}")]
    ConnectionFailed(String),

    /// Remote endpoint answered with an unexpected status
    #[error("Request failed: {status} - {message}")]
    RequestFailed { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The save configuration carries no upload URL
    #[error("Save configuration for job {0} has no signed upload URL")]
    MissingUploadUrl(String),

    /// Polling gave up because the stop token was set
    #[error("polling-stopped")]
    PollingStopped,

    /// Polling gave up because the timeout elapsed
    #[error("polling-timeout")]
    PollingTimeout,
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
