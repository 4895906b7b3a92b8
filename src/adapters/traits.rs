//! Collaborator traits
//!
//! This module defines the seams the export orchestrator drives. Concrete
//! implementations live in [`http`](super::http) and
//! [`activity`](super::activity); tests substitute scripted doubles.

use crate::domain::ids::FormatName;
use crate::domain::{PollOptions, Result, SaveConfiguration, SaveOptions};
use async_trait::async_trait;

/// Issues the signed URLs and job id for one export attempt
#[async_trait]
pub trait ConfigurationGenerator: Send + Sync {
    /// Requests a fresh save configuration for `format`
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration could be obtained. The error is
    /// surfaced to the caller as the failure reason.
    async fn generate_export_configuration(&self, format: &FormatName)
        -> Result<SaveConfiguration>;
}

/// Uploads export payloads and watches signed URLs for results
#[async_trait]
pub trait StorageTransport: Send + Sync {
    /// Uploads the serialized layout using the attempt's configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the upload was not accepted.
    async fn save(
        &self,
        payload: String,
        config: &SaveConfiguration,
        options: SaveOptions,
    ) -> Result<()>;

    /// Repeatedly checks `url` until it yields content
    ///
    /// Implementations must sleep `options.sleep_period` between attempts and
    /// consult `options.stopped` before scheduling each further attempt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, when stopped, or on timeout.
    async fn poll(&self, url: &str, options: PollOptions) -> Result<String>;
}

/// Fire-and-forget activity telemetry
///
/// Calls must return promptly and never influence the export's control flow.
pub trait ActivityLog: Send + Sync {
    /// Records a single event
    fn log(&self, event: &str);

    /// Starts a timer for `event`
    fn timer(&self, event: &str) -> Box<dyn ActivityTimer>;
}

/// Running activity timer
pub trait ActivityTimer: Send {
    /// Stops the timer and records its duration
    fn end(self: Box<Self>);
}
