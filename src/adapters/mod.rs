//! External integrations
//!
//! - [`traits`] - Collaborator seams consumed by the orchestrator
//! - [`http`] - `reqwest` implementations of the configuration generator and storage transport
//! - [`activity`] - Activity log backed by `tracing`

pub mod activity;
pub mod http;
pub mod traits;

pub use activity::TracingActivityLog;
pub use http::{HttpConfigurationGenerator, HttpStorageTransport};
pub use traits::{ActivityLog, ActivityTimer, ConfigurationGenerator, StorageTransport};
