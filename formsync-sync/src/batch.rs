//! Batch sync over many forms.

use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::SyncResult;
use crate::orchestrator::SyncOrchestrator;
use crate::report::{BatchItem, BatchReport};

/// Which forms a batch run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSelection {
    /// Every stored form of the configured content type.
    All,
    /// The given form ids, in order.
    Forms(Vec<String>),
}

impl SyncOrchestrator {
    /// Syncs forms one after another, never stopping on a failed form.
    ///
    /// Only listing the store for [`BatchSelection::All`] can fail the call.
    pub async fn sync_batch(&self, selection: BatchSelection) -> SyncResult<BatchReport> {
        let (ids, titles): (Vec<String>, HashMap<String, String>) = match selection {
            BatchSelection::All => {
                let forms = self.store().list_forms().await?;
                let content_type = &self.config().content_type;
                let bound: Vec<_> = forms.into_iter().filter(|f| &f.content_type == content_type).collect();
                let ids = bound.iter().map(|f| f.id.to_string()).collect();
                let titles = bound.into_iter().map(|f| (f.id.to_string(), f.title)).collect();
                (ids, titles)
            }
            BatchSelection::Forms(ids) => {
                let titles = match self.store().list_forms().await {
                    Ok(forms) => forms.into_iter().map(|f| (f.id.to_string(), f.title)).collect(),
                    Err(e) => {
                        warn!("Could not list forms for titles: {}", e);
                        HashMap::new()
                    }
                };
                (ids, titles)
            }
        };

        let mut report = BatchReport::default();
        for id in ids {
            let result = self.sync_form(&id, false).await;
            let item = BatchItem {
                title: titles.get(id.trim()).cloned().unwrap_or_default(),
                form_id: result.form_id.clone(),
                message: result.message.clone(),
            };
            if result.is_success() {
                report.success.push(item);
            } else {
                warn!("Batch sync of form {:?} failed: {}", id, result.message);
                report.error.push(item);
            }
        }

        info!(
            "Batch sync finished: {} succeeded, {} failed",
            report.success.len(),
            report.error.len()
        );
        Ok(report)
    }
}
