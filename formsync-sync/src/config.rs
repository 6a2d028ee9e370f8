//! Sync configuration.

use formsync_reconcile::{BlockLayout, ReconcileConfig};
use serde::{Deserialize, Serialize};

use crate::error::SyncResult;

/// Configuration for the sync orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Content type of forms bound to this reconciler. Batch runs over
    /// "all" forms and the editor trigger only consider this type.
    pub content_type: String,
    /// Skip the write when no key was added, removed, replaced or changed.
    pub skip_unchanged_writes: bool,
    /// Block names of the persisted document.
    pub layout: BlockLayout,
    pub reconcile: ReconcileConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            content_type: "formsync_form".to_string(),
            skip_unchanged_writes: false,
            layout: BlockLayout::default(),
            reconcile: ReconcileConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Reads a (possibly partial) JSON config over the defaults.
    pub fn from_json(raw: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
