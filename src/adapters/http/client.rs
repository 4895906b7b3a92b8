//! Shared HTTP client construction and response helpers

use crate::config::ServiceConfig;
use crate::domain::{ExportError, Result, TransportError};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

/// Builds the `reqwest` client used by the HTTP adapters
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] if the client cannot be built.
pub fn build_client(config: &ServiceConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .user_agent(concat!("layout-export/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ExportError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Maps a `reqwest` send error to a transport error
pub(crate) fn connection_error(error: reqwest::Error) -> ExportError {
    TransportError::ConnectionFailed(error.to_string()).into()
}

/// Turns a non-success response into a transport error, consuming its body
pub(crate) async fn request_failed(response: Response) -> ExportError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    TransportError::RequestFailed { status, message }.into()
}
