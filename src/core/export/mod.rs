//! Export orchestration
//!
//! This module provides the state machine that takes one export attempt from
//! a layout snapshot to a single settled outcome.

pub mod orchestrator;
pub mod settlement;
pub mod state;

pub use orchestrator::{ExportOrchestrator, PollSettings, ERROR_POLL_INTERVAL, RESULT_POLL_INTERVAL};
pub use settlement::{ExportHandle, Settlement};
pub use state::ExportState;
