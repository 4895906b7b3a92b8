//! Export orchestrator - drives one export attempt from layout to outcome
//!
//! An attempt resolves the layout for a format, asks the configuration
//! generator for signed URLs, uploads the serialized layout, and then races a
//! result poll loop against an error poll loop. The first loop to finish
//! settles the attempt and flips the shared [`StopToken`] so the other loop
//! stops at its next scheduling decision.

use super::settlement::{ExportHandle, Settlement};
use super::state::ExportState;
use crate::adapters::traits::{ActivityLog, ConfigurationGenerator, StorageTransport};
use crate::config::ExportConfig;
use crate::core::layout::ExportFunctions;
use crate::domain::ids::FormatName;
use crate::domain::{
    ExportFailure, ExportOutcome, ExportSuccess, FailureKind, Layout, PollOptions, Result,
    SaveConfiguration, SaveOptions, StopToken,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Cadence of the result-list poll loop
pub const RESULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);

/// Cadence of the error-list poll loop
pub const ERROR_POLL_INTERVAL: Duration = Duration::from_millis(15000);

/// Poll loop settings applied to every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between result-list requests
    pub result_interval: Duration,

    /// Sleep between error-list requests
    pub error_interval: Duration,

    /// Optional per-loop timeout handed to the transport
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            result_interval: RESULT_POLL_INTERVAL,
            error_interval: ERROR_POLL_INTERVAL,
            timeout: None,
        }
    }
}

impl PollSettings {
    /// Builds poll settings from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            result_interval: Duration::from_millis(config.result_poll_interval_ms),
            error_interval: Duration::from_millis(config.error_poll_interval_ms),
            timeout: (config.poll_timeout_seconds > 0)
                .then(|| Duration::from_secs(config.poll_timeout_seconds)),
        }
    }
}

/// Export orchestrator
///
/// Cheap to clone; every attempt gets its own configuration, stop token and
/// poll loops.
///
/// # Example
///
/// ```no_run
/// use layout_export::adapters::{HttpConfigurationGenerator, HttpStorageTransport, TracingActivityLog};
/// use layout_export::core::export::ExportOrchestrator;
/// use layout_export::core::layout::ExportFunctions;
/// use layout_export::domain::{FormatName, Layout};
/// use std::sync::Arc;
///
/// # async fn example(
/// #     generator: HttpConfigurationGenerator,
/// #     storage: HttpStorageTransport,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let pdf = FormatName::new("pdf")?;
/// let functions = ExportFunctions::new().with(pdf.clone(), Layout::new);
/// let orchestrator = ExportOrchestrator::new(
///     functions,
///     Arc::new(generator),
///     Arc::new(storage),
///     Arc::new(TracingActivityLog::new("Export")),
/// );
///
/// let success = orchestrator.start_export(&pdf, None).await?;
/// println!("{} ({})", success.signed_output_url, success.job_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExportOrchestrator {
    export_functions: ExportFunctions,
    configuration_generator: Arc<dyn ConfigurationGenerator>,
    storage: Arc<dyn StorageTransport>,
    activity_log: Arc<dyn ActivityLog>,
    poll_settings: PollSettings,
}

impl ExportOrchestrator {
    /// Create a new export orchestrator with the default poll cadences
    pub fn new(
        export_functions: ExportFunctions,
        configuration_generator: Arc<dyn ConfigurationGenerator>,
        storage: Arc<dyn StorageTransport>,
        activity_log: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            export_functions,
            configuration_generator,
            storage,
            activity_log,
            poll_settings: PollSettings::default(),
        }
    }

    /// Replaces the poll settings
    pub fn with_poll_settings(mut self, poll_settings: PollSettings) -> Self {
        self.poll_settings = poll_settings;
        self
    }

    /// Start an export attempt
    ///
    /// The layout is resolved and validated before this returns: an unknown
    /// format or an empty layout yields a handle that is already settled, and
    /// no collaborator is called. Otherwise the remaining stages run on a
    /// spawned task:
    /// 1. Generate the save configuration
    /// 2. Upload the serialized layout
    /// 3. Race the result loop against the error loop
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when the attempt gets past
    /// validation.
    pub fn start_export(&self, format: &FormatName, overrides: Option<&Layout>) -> ExportHandle {
        self.activity_log.log(&format!("export:start:{format}"));
        let timer = self.activity_log.timer(&format!("export:{format}"));
        let (settlement, handle) =
            Settlement::new(format.clone(), self.activity_log.clone(), timer);

        let span = tracing::info_span!(
            "export",
            attempt_id = %settlement.attempt_id(),
            format = %format
        );
        let _entered = span.enter();
        crate::log_export_start!(format, overrides.is_some());

        let Some(export) = self.export_functions.resolve(format) else {
            settlement.settle(Err(ExportFailure::without_job(
                FailureKind::UnknownFormat(format.clone()),
            )));
            return handle;
        };

        let current = export();
        // Overrides never rescue an empty export.
        if current.is_empty() {
            settlement.settle(Err(ExportFailure::without_job(FailureKind::Empty)));
            return handle;
        }
        let layout = match overrides {
            Some(overrides) => current.merged(overrides),
            None => current,
        };

        let attempt = Attempt {
            settlement,
            configuration_generator: self.configuration_generator.clone(),
            storage: self.storage.clone(),
            format: format.clone(),
            poll_settings: self.poll_settings,
        };
        tokio::spawn(attempt.run(layout).instrument(span.clone()));

        handle
    }
}

impl fmt::Debug for ExportOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOrchestrator")
            .field("export_functions", &self.export_functions)
            .field("poll_settings", &self.poll_settings)
            .finish_non_exhaustive()
    }
}

/// One in-flight attempt past validation
struct Attempt {
    settlement: Arc<Settlement>,
    configuration_generator: Arc<dyn ConfigurationGenerator>,
    storage: Arc<dyn StorageTransport>,
    format: FormatName,
    poll_settings: PollSettings,
}

impl Attempt {
    async fn run(self, layout: Layout) {
        self.settlement.advance(ExportState::Generating);
        let config = match self
            .configuration_generator
            .generate_export_configuration(&self.format)
            .await
        {
            Ok(config) => Arc::new(config),
            Err(e) => {
                self.settlement.settle(Err(ExportFailure::without_job(
                    FailureKind::Configuration(e),
                )));
                return;
            }
        };
        tracing::info!(job_id = %config.job_id, "Export configuration received");

        self.settlement.advance(ExportState::Uploading);
        if let Err(e) = self.upload(&layout, &config).await {
            // The job id is known here but is not reported for upload failures.
            self.settlement
                .settle(Err(ExportFailure::without_job(FailureKind::Upload(e))));
            return;
        }
        tracing::debug!(job_id = %config.job_id, "Layout uploaded");

        self.settlement.advance(ExportState::Polling);
        let stop = StopToken::new();
        self.spawn_poll_loop(PollTarget::ErrorList, config.clone(), stop.clone());
        self.spawn_poll_loop(PollTarget::OutputList, config, stop);
    }

    async fn upload(&self, layout: &Layout, config: &SaveConfiguration) -> Result<()> {
        let payload = layout.to_json()?;
        self.storage
            .save(payload, config, SaveOptions { is_private: true })
            .await
    }

    fn spawn_poll_loop(&self, target: PollTarget, config: Arc<SaveConfiguration>, stop: StopToken) {
        let url = target.url(&config).to_string();
        let mut options = PollOptions::new(target.interval(&self.poll_settings), stop.clone());
        if let Some(timeout) = self.poll_settings.timeout {
            options = options.with_timeout(timeout);
        }

        let storage = self.storage.clone();
        let settlement = self.settlement.clone();
        let poll_loop = async move {
            tracing::debug!(poll_loop = %target, url = %url, "Poll loop started");
            let polled = storage.poll(&url, options).await;
            let outcome = target.outcome(polled, &config);

            if stop.stop() {
                tracing::debug!(poll_loop = %target, "Poll loop finished first, stopping the other");
            }
            settlement.settle(outcome);
        };
        tokio::spawn(poll_loop.instrument(tracing::Span::current()));
    }
}

/// The two URLs watched while an export is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollTarget {
    OutputList,
    ErrorList,
}

impl PollTarget {
    fn url<'a>(&self, config: &'a SaveConfiguration) -> &'a str {
        match self {
            PollTarget::OutputList => &config.signed_output_list_url,
            PollTarget::ErrorList => &config.signed_error_list_url,
        }
    }

    fn interval(&self, settings: &PollSettings) -> Duration {
        match self {
            PollTarget::OutputList => settings.result_interval,
            PollTarget::ErrorList => settings.error_interval,
        }
    }

    fn outcome(&self, polled: Result<String>, config: &SaveConfiguration) -> ExportOutcome {
        let job_id = config.job_id.clone();
        match (self, polled) {
            (PollTarget::OutputList, Ok(_)) => Ok(ExportSuccess {
                signed_output_url: config.signed_output_url.clone(),
                job_id,
            }),
            (PollTarget::ErrorList, Ok(report)) => {
                tracing::debug!(job_id = %job_id, report = %report, "Error list appeared");
                Err(ExportFailure::for_job(FailureKind::GenerationError, job_id))
            }
            (_, Err(e)) => Err(ExportFailure::for_job(FailureKind::Poll(e), job_id)),
        }
    }
}

impl fmt::Display for PollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollTarget::OutputList => write!(f, "output-list"),
            PollTarget::ErrorList => write!(f, "error-list"),
        }
    }
}
