//! Content store abstraction.
//!
//! The orchestrator reads and writes form documents only through
//! [`ContentStore`]; [`FormStore`] is the bundled implementation.

use async_trait::async_trait;
use formsync_model::{ContentDocument, SerializedTree};
use formsync_storage::FormStore;
use formsync_types::FormId;
use serde::{Deserialize, Serialize};

use crate::error::SyncResult;

/// A form known to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormListing {
    pub id: FormId,
    pub title: String,
    pub content_type: String,
}

/// Persisted form documents.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Loads a form's document. `None` when the form is unknown.
    async fn load(&self, form_id: &FormId) -> SyncResult<Option<ContentDocument>>;

    /// Replaces a form's document with a serialized tree.
    async fn write(&self, form_id: &FormId, tree: SerializedTree) -> SyncResult<()>;

    /// Lists every known form.
    async fn list_forms(&self) -> SyncResult<Vec<FormListing>>;
}

#[async_trait]
impl ContentStore for FormStore {
    async fn load(&self, form_id: &FormId) -> SyncResult<Option<ContentDocument>> {
        Ok(self.load_document(form_id)?)
    }

    async fn write(&self, form_id: &FormId, tree: SerializedTree) -> SyncResult<()> {
        Ok(self.write_content(form_id, &tree)?)
    }

    async fn list_forms(&self) -> SyncResult<Vec<FormListing>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|form| FormListing {
                id: form.id,
                title: form.title,
                content_type: form.content_type,
            })
            .collect())
    }
}
