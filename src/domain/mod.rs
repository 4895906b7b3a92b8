//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`JobId`], [`FormatName`])
//! - **The layout snapshot** ([`Layout`]) with shallow merge and stable JSON
//! - **Per-attempt transport data** ([`SaveConfiguration`], [`SaveOptions`], [`PollOptions`])
//! - **Cooperative cancellation** ([`StopToken`])
//! - **Outcomes** ([`ExportOutcome`], [`ExportSuccess`], [`ExportFailure`])
//! - **Error types** ([`ExportError`], [`TransportError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! Collaborators return [`Result<T, ExportError>`]. When an export attempt
//! fails, the collaborator's error is wrapped in a [`FailureKind`] so callers
//! can tell which stage failed while still seeing the original reason:
//!
//! ```rust
//! use layout_export::domain::{ExportError, ExportFailure, FailureKind};
//!
//! let failure = ExportFailure::without_job(FailureKind::Upload(ExportError::Other(
//!     "bucket unavailable".to_string(),
//! )));
//! assert_eq!(failure.reason(), "bucket unavailable");
//! assert!(failure.job_id().is_none());
//! ```

pub mod cancellation;
pub mod errors;
pub mod ids;
pub mod layout;
pub mod outcome;
pub mod result;
pub mod save;

// Re-export commonly used types for convenience
pub use cancellation::StopToken;
pub use errors::{ExportError, TransportError};
pub use ids::{FormatName, JobId};
pub use layout::Layout;
pub use outcome::{ExportFailure, ExportOutcome, ExportSuccess, FailureKind};
pub use result::Result;
pub use save::{PollOptions, SaveConfiguration, SaveOptions};
