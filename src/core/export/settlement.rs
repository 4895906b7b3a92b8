//! Single-settlement outcome channel
//!
//! [`Settlement`] is the producing side shared by every stage of an attempt
//! (including both poll loops); [`ExportHandle`] is the future the caller
//! awaits. Only the first call to [`Settlement::settle`] is delivered. Later
//! calls are logged and dropped.

use super::state::ExportState;
use crate::adapters::traits::{ActivityLog, ActivityTimer};
use crate::domain::ids::FormatName;
use crate::domain::{ExportFailure, ExportOutcome, FailureKind};
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::sync::{oneshot, watch};
use uuid::Uuid;

struct Pending {
    sender: oneshot::Sender<ExportOutcome>,
    timer: Box<dyn ActivityTimer>,
}

/// Producer side of an attempt's outcome
pub struct Settlement {
    attempt_id: Uuid,
    format: FormatName,
    pending: Mutex<Option<Pending>>,
    state: watch::Sender<ExportState>,
    activity_log: Arc<dyn ActivityLog>,
}

impl Settlement {
    /// Creates the settlement and the handle observing it
    ///
    /// `timer` is ended exactly once, when the outcome is delivered.
    pub fn new(
        format: FormatName,
        activity_log: Arc<dyn ActivityLog>,
        timer: Box<dyn ActivityTimer>,
    ) -> (Arc<Self>, ExportHandle) {
        let attempt_id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();
        let (state, state_receiver) = watch::channel(ExportState::Idle);

        let settlement = Arc::new(Self {
            attempt_id,
            format,
            pending: Mutex::new(Some(Pending { sender, timer })),
            state,
            activity_log,
        });
        let handle = ExportHandle {
            attempt_id,
            outcome: receiver,
            state: state_receiver,
        };
        (settlement, handle)
    }

    /// Attempt identifier, used to correlate log lines
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Current state
    pub fn state(&self) -> ExportState {
        *self.state.borrow()
    }

    /// Moves the attempt to `next`; returns `false` if the move is not legal
    /// from the current state (for example after settlement)
    pub fn advance(&self, next: ExportState) -> bool {
        let mut moved = false;
        self.state.send_if_modified(|current| {
            if current.can_transition_to(next) {
                *current = next;
                moved = true;
            }
            moved
        });

        if moved {
            tracing::debug!(state = %next, "Export state changed");
        } else {
            tracing::debug!(
                from = %self.state(),
                to = %next,
                "Ignoring export state change"
            );
        }
        moved
    }

    /// Delivers `outcome` unless the attempt has already settled
    ///
    /// Returns `true` for the call that settled the attempt.
    pub fn settle(&self, outcome: ExportOutcome) -> bool {
        let pending = match self.pending.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        let Some(pending) = pending else {
            tracing::debug!(
                outcome = %describe(&outcome),
                "Export already settled, dropping late outcome"
            );
            return false;
        };

        self.advance(ExportState::Settled);
        pending.timer.end();

        match &outcome {
            Ok(success) => {
                self.activity_log
                    .log(&format!("export:success:{}", self.format));
                crate::log_export_settled!(self.format, success.job_id, "success");
            }
            Err(failure) => {
                self.activity_log
                    .log(&format!("export:failure:{}", self.format));
                tracing::warn!(
                    format = %self.format,
                    reason = %failure.reason(),
                    job_id = ?failure.job_id().map(|id| id.as_str()),
                    "Export failed"
                );
            }
        }

        if pending.sender.send(outcome).is_err() {
            tracing::debug!("Export handle dropped before the outcome was delivered");
        }
        true
    }
}

fn describe(outcome: &ExportOutcome) -> String {
    match outcome {
        Ok(success) => format!("success({})", success.job_id),
        Err(failure) => format!("failure({})", failure.reason()),
    }
}

/// Caller side of an export attempt
///
/// Resolves to the attempt's [`ExportOutcome`]. Dropping the handle does not
/// cancel the attempt.
#[derive(Debug)]
pub struct ExportHandle {
    attempt_id: Uuid,
    outcome: oneshot::Receiver<ExportOutcome>,
    state: watch::Receiver<ExportState>,
}

impl ExportHandle {
    /// Attempt identifier
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Current state of the attempt
    pub fn state(&self) -> ExportState {
        *self.state.borrow()
    }

    /// Waits until the attempt reaches `target` or settles, returning the
    /// state actually reached
    pub async fn reached(&mut self, target: ExportState) -> ExportState {
        match self
            .state
            .wait_for(|state| *state >= target || state.is_terminal())
            .await
        {
            Ok(state) => *state,
            Err(_) => ExportState::Settled,
        }
    }
}

impl Future for ExportHandle {
    type Output = ExportOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.outcome.poll_unpin(cx).map(|received| {
            received.unwrap_or_else(|_| Err(ExportFailure::without_job(FailureKind::Abandoned)))
        })
    }
}
