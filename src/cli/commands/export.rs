//! Export command implementation
//!
//! This module implements the `export` command: read a layout file, apply
//! overrides, run one export attempt against the configured service and
//! report the signed output URL.

use crate::adapters::{HttpConfigurationGenerator, HttpStorageTransport, TracingActivityLog};
use crate::config::{load_config, AppConfig};
use crate::core::export::{ExportOrchestrator, PollSettings};
use crate::core::layout::{
    build_layout_exporter, resource_url_translator, ExportFunctions, LayoutSource,
    SnapshotLayoutSource,
};
use crate::domain::{FormatName, Layout};
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format (e.g. PNG, SVG)
    #[arg(short, long)]
    pub format: String,

    /// Layout JSON file to export
    #[arg(long)]
    pub layout: String,

    /// JSON file with top-level override settings
    #[arg(long)]
    pub overrides: Option<String>,

    /// Single override setting as key=value (value parsed as JSON when possible)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(format = %self.format, layout = %self.layout, "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let format = match FormatName::new(self.format.clone()) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Invalid format: {e}");
                return Ok(2);
            }
        };

        let layout_text = fs::read_to_string(&self.layout)
            .with_context(|| format!("Failed to read layout file {}", self.layout))?;
        let layout = Layout::from_json(&layout_text)
            .with_context(|| format!("Failed to parse layout file {}", self.layout))?;

        let overrides = self.collect_overrides()?;

        let orchestrator = match build_orchestrator(&config, &format, layout) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Exporting {} as {format}...", self.layout);

        let handle = orchestrator.start_export(&format, overrides.as_ref());
        let attempt_id = handle.attempt_id();

        let outcome = tokio::select! {
            outcome = handle => outcome,
            Ok(_) = shutdown_signal.wait_for(|stop| *stop) => {
                tracing::info!(%attempt_id, "Export interrupted by user signal");
                println!();
                println!("⚠️  Export interrupted before it settled.");
                return Ok(130);
            }
        };

        match outcome {
            Ok(success) => {
                println!("✅ Export completed successfully!");
                println!("  Output URL: {}", success.signed_output_url);
                println!("  Job ID: {}", success.job_id);
                Ok(0)
            }
            Err(failure) => {
                println!("❌ Export failed: {}", failure.reason());
                if let Some(job_id) = failure.job_id() {
                    println!("  Job ID: {job_id}");
                }
                Ok(1)
            }
        }
    }

    /// Override settings from `--overrides` merged with `--set` pairs
    ///
    /// `--set` wins over the file. Returns `None` when neither was given.
    fn collect_overrides(&self) -> anyhow::Result<Option<Layout>> {
        if self.overrides.is_none() && self.set.is_empty() {
            return Ok(None);
        }

        let mut overrides = match &self.overrides {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read overrides file {path}"))?;
                Layout::from_json(&text)
                    .with_context(|| format!("Failed to parse overrides file {path}"))?
            }
            None => Layout::new(),
        };

        for pair in &self.set {
            let (key, value) = parse_setting(pair)?;
            overrides.insert(key, value);
        }

        Ok(Some(overrides))
    }
}

/// Parses `key=value`; the value is JSON if it parses, a string otherwise
fn parse_setting(pair: &str) -> anyhow::Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .with_context(|| format!("Invalid --set '{pair}': expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid --set '{pair}': key cannot be empty");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn build_orchestrator(
    config: &AppConfig,
    format: &FormatName,
    layout: Layout,
) -> crate::domain::Result<ExportOrchestrator> {
    let source: Arc<dyn LayoutSource> = Arc::new(SnapshotLayoutSource::new(layout));

    let icon_base = config
        .resources
        .icon_base()
        .map_err(crate::domain::ExportError::Configuration)?;
    let export_functions = match icon_base {
        Some(base) => ExportFunctions::new().with(
            format.clone(),
            build_layout_exporter(source, resource_url_translator(base)),
        ),
        None => ExportFunctions::new().with(
            format.clone(),
            build_layout_exporter(source, |url: &str| url.to_string()),
        ),
    };

    let generator = HttpConfigurationGenerator::new(&config.service)?;
    let storage = HttpStorageTransport::new(&config.service)?;
    tracing::debug!(endpoint = %generator.endpoint(), "Using configuration service");

    Ok(ExportOrchestrator::new(
        export_functions,
        Arc::new(generator),
        Arc::new(storage),
        Arc::new(TracingActivityLog::new("layout-export")),
    )
    .with_poll_settings(PollSettings::from_config(&config.export)))
}
