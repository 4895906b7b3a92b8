//! Activity log backed by `tracing`
//!
//! Events go to the `activity` target so they can be filtered separately from
//! diagnostic output (`RUST_LOG=activity=info`).

use super::traits::{ActivityLog, ActivityTimer};
use std::time::Instant;

/// Activity log that emits `tracing` events
#[derive(Debug, Clone, Default)]
pub struct TracingActivityLog {
    category: String,
}

impl TracingActivityLog {
    /// Creates an activity log whose events carry `category`
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl ActivityLog for TracingActivityLog {
    fn log(&self, event: &str) {
        tracing::info!(
            target: "activity",
            category = %self.category,
            event = %event,
            "Activity"
        );
    }

    fn timer(&self, event: &str) -> Box<dyn ActivityTimer> {
        Box::new(TracingTimer {
            category: self.category.clone(),
            event: event.to_string(),
            started: Instant::now(),
        })
    }
}

struct TracingTimer {
    category: String,
    event: String,
    started: Instant,
}

impl ActivityTimer for TracingTimer {
    fn end(self: Box<Self>) {
        tracing::info!(
            target: "activity",
            category = %self.category,
            event = %self.event,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Activity timer"
        );
    }
}
