use formsync_model::{ContentDocument, SerializedTree};
use formsync_types::FormId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// A persisted form: metadata plus its serialized content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredForm {
    pub id: FormId,
    #[serde(default)]
    pub title: String,
    /// Host-side content type, used to tell bound forms apart from others.
    #[serde(default)]
    pub content_type: String,
    /// Serialized [`ContentDocument`]; empty means "no content yet".
    #[serde(default)]
    pub content: String,
}

impl StoredForm {
    pub fn new(id: FormId, title: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content_type: content_type.into(),
            content: String::new(),
        }
    }

    /// Sets the content from a document.
    pub fn with_document(mut self, document: &ContentDocument) -> StorageResult<Self> {
        self.content = serde_json::to_string(document)?;
        Ok(self)
    }

    /// Parses the stored content. Empty content is an empty document.
    pub fn document(&self) -> StorageResult<ContentDocument> {
        if self.content.trim().is_empty() {
            return Ok(ContentDocument::default());
        }
        Ok(serde_json::from_str(&self.content)?)
    }
}

enum Backend {
    Memory(RwLock<BTreeMap<FormId, StoredForm>>),
    Directory(PathBuf),
}

/// Form document store.
pub struct FormStore {
    backend: Backend,
}

impl FormStore {
    /// Opens a store that lives only in memory.
    pub fn open_in_memory() -> Self {
        Self {
            backend: Backend::Memory(RwLock::new(BTreeMap::new())),
        }
    }

    /// Opens a directory-backed store, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("Opened form store at {}", dir.display());
        Ok(Self {
            backend: Backend::Directory(dir),
        })
    }

    /// Fetches a stored form.
    pub fn get(&self, id: &FormId) -> StorageResult<Option<StoredForm>> {
        match &self.backend {
            Backend::Memory(forms) => {
                let forms = forms.read().map_err(|_| StorageError::LockPoisoned)?;
                Ok(forms.get(id).cloned())
            }
            Backend::Directory(dir) => {
                let path = form_path(dir, id)?;
                if !path.exists() {
                    return Ok(None);
                }
                let raw = fs::read_to_string(&path)?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
        }
    }

    /// Loads and parses a form's document.
    pub fn load_document(&self, id: &FormId) -> StorageResult<Option<ContentDocument>> {
        self.get(id)?.map(|form| form.document()).transpose()
    }

    /// Inserts or replaces a form.
    pub fn put(&self, form: &StoredForm) -> StorageResult<()> {
        match &self.backend {
            Backend::Memory(forms) => {
                let mut forms = forms.write().map_err(|_| StorageError::LockPoisoned)?;
                forms.insert(form.id.clone(), form.clone());
                Ok(())
            }
            Backend::Directory(dir) => {
                let path = form_path(dir, &form.id)?;
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, serde_json::to_vec_pretty(form)?)?;
                fs::rename(&tmp, &path)?;
                Ok(())
            }
        }
    }

    /// Replaces the content of an existing form, keeping its metadata.
    pub fn write_content(&self, id: &FormId, content: &SerializedTree) -> StorageResult<()> {
        let mut form = self
            .get(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        form.content = content.as_str().to_string();
        self.put(&form)?;
        debug!("Wrote {} bytes of content for form {}", form.content.len(), id);
        Ok(())
    }

    /// Lists every stored form, ordered by id.
    pub fn list(&self) -> StorageResult<Vec<StoredForm>> {
        match &self.backend {
            Backend::Memory(forms) => {
                let forms = forms.read().map_err(|_| StorageError::LockPoisoned)?;
                Ok(forms.values().cloned().collect())
            }
            Backend::Directory(dir) => {
                let mut forms = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    let raw = fs::read_to_string(&path)?;
                    forms.push(serde_json::from_str::<StoredForm>(&raw)?);
                }
                forms.sort_by(|a, b| a.id.cmp(&b.id));
                Ok(forms)
            }
        }
    }
}

/// Form ids become file names, so path separators and leading dots are refused.
fn form_path(dir: &Path, id: &FormId) -> StorageResult<PathBuf> {
    let name = id.as_str();
    if name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(StorageError::InvalidData(format!("form id not usable as a file name: {name}")));
    }
    Ok(dir.join(format!("{name}.json")))
}
