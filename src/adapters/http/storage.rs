//! Storage transport for pre-signed URLs
//!
//! Uploads go to the attempt's signed upload URL with a `PUT`. Polling issues
//! `GET` requests against a signed list URL: a 2xx response resolves the poll
//! with the body, 403/404 mean "not there yet", anything else rejects.

use super::client::{build_client, connection_error, request_failed};
use crate::adapters::traits::StorageTransport;
use crate::config::ServiceConfig;
use crate::domain::{
    ExportError, PollOptions, Result, SaveConfiguration, SaveOptions, TransportError,
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Instant;

/// HTTP storage transport
pub struct HttpStorageTransport {
    client: Client,
}

impl HttpStorageTransport {
    /// Create a transport from the `[service]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(config)?))
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Statuses a signed URL returns while the object does not exist yet
fn is_pending(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl StorageTransport for HttpStorageTransport {
    async fn save(
        &self,
        payload: String,
        config: &SaveConfiguration,
        options: SaveOptions,
    ) -> Result<()> {
        let url = config
            .signed_upload_url
            .as_deref()
            .ok_or_else(|| TransportError::MissingUploadUrl(config.job_id.to_string()))?;
        let acl = if options.is_private {
            "private"
        } else {
            "public-read"
        };

        tracing::debug!(
            job_id = %config.job_id,
            bytes = payload.len(),
            acl = acl,
            "Uploading export payload"
        );

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-amz-acl", acl)
            .body(payload)
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }
        Ok(())
    }

    async fn poll(&self, url: &str, options: PollOptions) -> Result<String> {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let response = self.client.get(url).send().await.map_err(connection_error)?;
            let status = response.status();

            if status.is_success() {
                tracing::debug!(url = %url, attempt = attempt, "Poll resolved");
                return response.text().await.map_err(|e| {
                    ExportError::Transport(TransportError::InvalidResponse(e.to_string()))
                });
            }
            if !is_pending(status) {
                return Err(request_failed(response).await);
            }

            tracing::trace!(
                url = %url,
                attempt = attempt,
                status = status.as_u16(),
                "Not ready yet"
            );

            if options.is_stopped() {
                return Err(TransportError::PollingStopped.into());
            }
            if let Some(timeout) = options.timeout {
                if started.elapsed() >= timeout {
                    tracing::warn!(url = %url, attempts = attempt, "Polling timed out");
                    return Err(TransportError::PollingTimeout.into());
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(options.sleep_period) => {}
                _ = options.stopped.stopped() => {
                    return Err(TransportError::PollingStopped.into());
                }
            }
        }
    }
}
