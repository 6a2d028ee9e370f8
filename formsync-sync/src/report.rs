//! Sync reports.

use formsync_model::{ContentDocument, SerializedTree};
use formsync_reconcile::{Diff, ReplaceReason};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, SyncError};

/// Overall outcome of one form sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    Error,
}

/// Furthest step a sync run reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Start,
    /// Content was loaded; failures here are extraction, fetch or validation.
    Loaded,
    /// A diff was computed; failures here are persistence failures.
    Diffed,
    /// The reconciled tree was written.
    Persisted,
    /// Nothing was written (preview, no output, or no changes).
    Skipped,
}

/// Diff buckets plus the serialized output, when one was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub replaced: Vec<String>,
    pub changed: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub replace_reasons: IndexMap<String, ReplaceReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized: Option<SerializedTree>,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.removed.is_empty()
            && self.replaced.is_empty()
            && self.changed.is_empty())
    }

    /// One-line count of every bucket.
    pub fn describe(&self) -> String {
        format!(
            "{} added, {} removed, {} replaced, {} changed",
            self.added.len(),
            self.removed.len(),
            self.replaced.len(),
            self.changed.len()
        )
    }
}

impl From<&Diff> for DiffSummary {
    fn from(diff: &Diff) -> Self {
        Self {
            added: diff.added.clone(),
            removed: diff.removed.clone(),
            replaced: diff.replaced.clone(),
            changed: diff.changed.clone(),
            replace_reasons: diff.replace_reasons.clone(),
            serialized: None,
        }
    }
}

/// Result of one `sync_form` call. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub form_id: String,
    pub status: SyncStatus,
    pub stage: SyncStage,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffSummary>,
    /// The rebuilt document, kept for preview consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tree: Option<ContentDocument>,
}

impl SyncReport {
    pub(crate) fn success(
        form_id: impl Into<String>,
        stage: SyncStage,
        message: impl Into<String>,
        diff: DiffSummary,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            status: SyncStatus::Success,
            stage,
            message: message.into(),
            error: None,
            diff: Some(diff),
            output_tree: None,
        }
    }

    pub(crate) fn failure(
        form_id: impl Into<String>,
        stage: SyncStage,
        error: &SyncError,
        diff: Option<DiffSummary>,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            status: SyncStatus::Error,
            stage,
            message: error.to_string(),
            error: Some(error.code()),
            diff,
            output_tree: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SyncStatus::Success
    }
}

/// A form as listed in a batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub form_id: String,
    pub title: String,
    pub message: String,
}

/// Combined outcome of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// No form was processed.
    Empty,
    Success,
    /// Some forms failed.
    Warning,
    /// Every form failed.
    Error,
}

/// Per-status lists of the forms a batch run touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub success: Vec<BatchItem>,
    pub error: Vec<BatchItem>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchStatus {
        match (self.success.is_empty(), self.error.is_empty()) {
            (true, true) => BatchStatus::Empty,
            (false, true) => BatchStatus::Success,
            (false, false) => BatchStatus::Warning,
            (true, false) => BatchStatus::Error,
        }
    }

    /// Human-readable summary line.
    pub fn message(&self) -> String {
        let titles = |items: &[BatchItem]| {
            items
                .iter()
                .map(|i| if i.title.is_empty() { i.form_id.clone() } else { i.title.clone() })
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.summary() {
            BatchStatus::Empty => "No forms to sync".to_string(),
            BatchStatus::Success => format!("Synced {} form(s): {}", self.success.len(), titles(&self.success)),
            BatchStatus::Warning => format!(
                "Synced {} form(s), {} failed: {}",
                self.success.len(),
                self.error.len(),
                titles(&self.error)
            ),
            BatchStatus::Error => format!("All {} form(s) failed: {}", self.error.len(), titles(&self.error)),
        }
    }
}
