//! Export outcome types
//!
//! An export attempt ends in exactly one [`ExportOutcome`]: the signed output
//! URL with its job id, or an [`ExportFailure`] carrying the reason and, when
//! one was obtained, the job id.

use super::errors::ExportError;
use super::ids::{FormatName, JobId};
use thiserror::Error;

/// Terminal result of one export attempt
pub type ExportOutcome = std::result::Result<ExportSuccess, ExportFailure>;

/// Successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSuccess {
    /// Where the finished export can be downloaded
    pub signed_output_url: String,

    /// Job that produced it
    pub job_id: JobId,
}

/// Why an export attempt failed
#[derive(Debug, Error)]
pub enum FailureKind {
    /// The layout (after overrides) had no keys
    #[error("empty")]
    Empty,

    /// No export function is registered for the format
    #[error("unknown-format: {0}")]
    UnknownFormat(FormatName),

    /// The configuration generator rejected
    #[error("{0}")]
    Configuration(#[source] ExportError),

    /// The upload rejected
    #[error("{0}")]
    Upload(#[source] ExportError),

    /// One of the poll requests rejected
    #[error("{0}")]
    Poll(#[source] ExportError),

    /// The error list appeared before the result list
    #[error("generation-error")]
    GenerationError,

    /// The attempt was dropped before it settled (runtime shut down)
    #[error("abandoned")]
    Abandoned,
}

/// Failed export: reason plus the job id when one is reported
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ExportFailure {
    /// Failure reason
    pub kind: FailureKind,

    /// Job id, absent when the failure happened before a usable job existed
    pub job_id: Option<JobId>,
}

impl ExportFailure {
    /// Failure with no job id
    pub fn without_job(kind: FailureKind) -> Self {
        Self { kind, job_id: None }
    }

    /// Failure tied to a job
    pub fn for_job(kind: FailureKind, job_id: JobId) -> Self {
        Self {
            kind,
            job_id: Some(job_id),
        }
    }

    /// Reason text as presented to callers (`"empty"`, `"generation-error"`,
    /// or the collaborator's own message)
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    /// Job id, if reported
    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }
}
