//! Save configuration and transport option types
//!
//! A [`SaveConfiguration`] is issued once per export attempt by the
//! configuration generator and stays immutable for the rest of the attempt.

use super::ids::JobId;
use super::cancellation::StopToken;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Signed URLs and job identifier for one export attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfiguration {
    /// URL polled for generation errors
    pub signed_error_list_url: String,

    /// URL polled for the finished result
    pub signed_output_list_url: String,

    /// URL of the finished export, handed back to the caller on success
    pub signed_output_url: String,

    /// Job identifier
    #[serde(alias = "s3UploadIdentifier")]
    pub job_id: JobId,

    /// Pre-authorized upload target, used by the HTTP transport's `save`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_upload_url: Option<String>,
}

/// Options passed to [`StorageTransport::save`](crate::adapters::StorageTransport::save)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Store the upload with a private ACL
    pub is_private: bool,
}

/// Options for one poll loop
///
/// The `stopped` token is shared between the two loops of an export attempt;
/// transports must consult it before scheduling another request.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between two requests against the same URL
    pub sleep_period: Duration,

    /// Cooperative cancellation token
    pub stopped: StopToken,

    /// Give up after this long without a result
    pub timeout: Option<Duration>,
}

impl PollOptions {
    /// Creates poll options with no timeout
    pub fn new(sleep_period: Duration, stopped: StopToken) -> Self {
        Self {
            sleep_period,
            stopped,
            timeout: None,
        }
    }

    /// Sets the poll timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reports whether the loop has been asked to stop
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_stopped()
    }
}
