//! Core business logic.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration: state machine, settlement, poll race
//! - [`layout`] - Layout sources, icon rewriting and per-format export functions

pub mod export;
pub mod layout;
