//! Sync on editor open.
//!
//! The host application calls [`EditorObserver::on_content_editor_opened`]
//! whenever an editing surface for a content item is loaded.

use async_trait::async_trait;
use formsync_types::FormId;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::orchestrator::SyncOrchestrator;

/// Notified when a content item's editor is opened.
#[async_trait]
pub trait EditorObserver: Send + Sync {
    async fn on_content_editor_opened(&self, form_id: &FormId, content_type: &str);
}

/// Runs a (writing) sync for forms bound to the reconciler. Errors are
/// logged and never returned, so opening the editor is never blocked.
pub struct SyncOnEditorOpen {
    orchestrator: Arc<SyncOrchestrator>,
}

impl SyncOnEditorOpen {
    pub fn new(orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl EditorObserver for SyncOnEditorOpen {
    async fn on_content_editor_opened(&self, form_id: &FormId, content_type: &str) {
        if content_type != self.orchestrator.config().content_type {
            debug!("Editor opened for {} ({}), not a synced form", form_id, content_type);
            return;
        }

        let report = self.orchestrator.sync_form(form_id.as_str(), false).await;
        if !report.is_success() {
            warn!("Sync on editor open failed for form {}: {}", form_id, report.message);
        }
    }
}
