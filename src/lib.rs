// layout-export - Diagram layout export orchestration
// Copyright (c) 2025 layout-export Contributors
// Licensed under the MIT License

//! # layout-export
//!
//! Drives one export of a diagram layout through a signed-URL export service:
//! obtain a save configuration for the requested format, upload the layout,
//! then race a result poll against an error poll until exactly one of them
//! settles the attempt.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export state machine, poll race and layout mapping
//! - [`adapters`] - Collaborator traits and their HTTP/tracing implementations
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layout_export::adapters::{HttpConfigurationGenerator, HttpStorageTransport, TracingActivityLog};
//! use layout_export::config::load_config;
//! use layout_export::core::export::{ExportOrchestrator, PollSettings};
//! use layout_export::core::layout::ExportFunctions;
//! use layout_export::domain::{FormatName, Layout};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("layout-export.toml")?;
//!     let png = FormatName::new("PNG")?;
//!
//!     let functions = ExportFunctions::new().with(png.clone(), || {
//!         Layout::try_from(json!({"nodes": {}, "links": []})).unwrap_or_default()
//!     });
//!     let orchestrator = ExportOrchestrator::new(
//!         functions,
//!         Arc::new(HttpConfigurationGenerator::new(&config.service)?),
//!         Arc::new(HttpStorageTransport::new(&config.service)?),
//!         Arc::new(TracingActivityLog::new("layout-export")),
//!     )
//!     .with_poll_settings(PollSettings::from_config(&config.export));
//!
//!     match orchestrator.start_export(&png, None).await {
//!         Ok(success) => println!("{}", success.signed_output_url),
//!         Err(failure) => eprintln!("export failed: {}", failure.reason()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Collaborators return [`domain::ExportError`]. An attempt resolves to an
//! [`domain::ExportOutcome`] whose failure side names the stage that failed
//! and carries the job id once one is known.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
