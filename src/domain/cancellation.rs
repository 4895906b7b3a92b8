//! Cooperative cancellation token shared by the poll loops of one export attempt
//!
//! The token is built on a `tokio::sync::watch` channel, the same primitive the
//! CLI uses for its shutdown signal. It only ever moves from "running" to
//! "stopped"; there is no way to reset it.

use std::sync::Arc;
use tokio::sync::watch;

/// One-way stop flag
///
/// Clones observe the same flag. Reading it never blocks, and
/// [`StopToken::stopped`] lets a sleeping loop wake as soon as the flag flips.
///
/// # Example
///
/// ```
/// use layout_export::domain::StopToken;
///
/// let token = StopToken::new();
/// let seen_by_loop = token.clone();
///
/// assert!(!seen_by_loop.is_stopped());
/// assert!(token.stop());
/// assert!(seen_by_loop.is_stopped());
/// assert!(!token.stop());
/// ```
#[derive(Debug, Clone)]
pub struct StopToken {
    sender: Arc<watch::Sender<bool>>,
}

impl StopToken {
    /// Creates a token in the running state
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sets the flag; returns `true` if this call was the one that flipped it
    pub fn stop(&self) -> bool {
        !self.sender.send_replace(true)
    }

    /// Reports whether the flag has been set
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }

    /// Completes once the flag has been set
    pub async fn stopped(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopToken {
    fn default() -> Self {
        Self::new()
    }
}
