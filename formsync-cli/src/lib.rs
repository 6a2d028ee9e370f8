//! Runners behind the `formsync` binary.
//!
//! Each command returns an [`Outcome`]: the JSON printed on stdout and
//! whether the process should exit successfully.

use anyhow::{Context, Result};
use formsync_storage::FormStore;
use formsync_sync::{
    BatchReport, BatchSelection, BatchStatus, DiffSummary, DirectorySchemaSource, SyncConfig,
    SyncOrchestrator, SyncReport,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Printed output of a command plus its exit status.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: serde_json::Value,
    pub success: bool,
}

/// Reads the config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    SyncConfig::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Wires a directory form store and the cached schema sources together.
pub fn open_orchestrator(store_dir: &Path, schemas_dir: &Path, config: SyncConfig) -> Result<SyncOrchestrator> {
    let store = FormStore::open(store_dir)
        .with_context(|| format!("opening form store {}", store_dir.display()))?;
    let sources = DirectorySchemaSource::discover(schemas_dir)
        .with_context(|| format!("reading schema directory {}", schemas_dir.display()))?;
    debug!("Schema sources: {}", sources.types().collect::<Vec<_>>().join(", "));
    Ok(SyncOrchestrator::new(Arc::new(store), sources, config))
}

/// `sync <form-id> [--preview]`: the full report.
pub async fn run_sync(orchestrator: &SyncOrchestrator, form_id: &str, preview: bool) -> Result<Outcome> {
    let report = orchestrator.sync_form(form_id, preview).await;
    info!("{}: {}", report.form_id, report.message);
    Ok(Outcome {
        success: report.is_success(),
        output: serde_json::to_value(&report)?,
    })
}

/// `diff <form-id>`: a preview reduced to its diff buckets.
pub async fn run_diff(orchestrator: &SyncOrchestrator, form_id: &str) -> Result<Outcome> {
    let report = orchestrator.sync_form(form_id, true).await;
    Ok(Outcome {
        success: report.is_success(),
        output: serde_json::to_value(DiffOutput::from(report))?,
    })
}

/// `sync-all [<form-id>...]`: every bound form when no id is given.
/// Fails only when every form failed.
pub async fn run_sync_all(orchestrator: &SyncOrchestrator, form_ids: Vec<String>) -> Result<Outcome> {
    let selection = if form_ids.is_empty() {
        BatchSelection::All
    } else {
        BatchSelection::Forms(form_ids)
    };
    let report = orchestrator.sync_batch(selection).await?;
    let status = report.summary();
    info!("{}", report.message());
    Ok(Outcome {
        success: status != BatchStatus::Error,
        output: serde_json::to_value(BatchOutput::new(status, report))?,
    })
}

#[derive(Serialize)]
struct DiffOutput {
    form_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    diff: Option<DiffSummary>,
}

impl From<SyncReport> for DiffOutput {
    fn from(report: SyncReport) -> Self {
        let error = (!report.is_success()).then_some(report.message);
        let diff = report.diff.map(|mut diff| {
            diff.serialized = None;
            diff
        });
        Self {
            form_id: report.form_id,
            error,
            diff,
        }
    }
}

#[derive(Serialize)]
struct BatchOutput {
    status: BatchStatus,
    message: String,
    #[serde(flatten)]
    report: BatchReport,
}

impl BatchOutput {
    fn new(status: BatchStatus, report: BatchReport) -> Self {
        Self {
            status,
            message: report.message(),
            report,
        }
    }
}
