//! Schema sources.
//!
//! One [`SchemaSource`] per provider, collected in an explicit
//! [`SchemaSources`] registry that is handed to the orchestrator.

use async_trait::async_trait;
use formsync_model::IntegrationSchema;
use formsync_types::{FormId, ItemId};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// Fetches the authoritative field schema for a provider.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// The integration type this source serves ("hubspot", "airtable", ...).
    fn integration_type(&self) -> &str;

    /// Fetches the schema for one form. `None` when the provider has nothing.
    async fn fetch_schema(
        &self,
        form_id: &FormId,
        item_id: &ItemId,
    ) -> SyncResult<Option<IntegrationSchema>>;
}

/// Registry of schema sources keyed by integration type.
#[derive(Clone, Default)]
pub struct SchemaSources {
    sources: BTreeMap<String, Arc<dyn SchemaSource>>,
}

impl std::fmt::Debug for SchemaSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaSources")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source, replacing any previous one for the same type.
    pub fn register(&mut self, source: Arc<dyn SchemaSource>) {
        self.sources.insert(source.integration_type().to_string(), source);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, source: Arc<dyn SchemaSource>) -> Self {
        self.register(source);
        self
    }

    pub fn get(&self, integration_type: &str) -> Option<&Arc<dyn SchemaSource>> {
        self.sources.get(integration_type)
    }

    /// Registered integration types, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Serves cached provider schemas from `<root>/<type>/<itemId>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySchemaSource {
    integration_type: String,
    dir: PathBuf,
}

impl DirectorySchemaSource {
    pub fn new(integration_type: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let integration_type = integration_type.into();
        let dir = root.into().join(&integration_type);
        Self { integration_type, dir }
    }

    /// Registers one source per subdirectory of `root`.
    pub fn discover(root: impl Into<PathBuf>) -> SyncResult<SchemaSources> {
        let root = root.into();
        let mut sources = SchemaSources::new();
        let entries = std::fs::read_dir(&root)
            .map_err(|e| SyncError::SchemaFetch(format!("{}: {e}", root.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| SyncError::SchemaFetch(e.to_string()))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                debug!("Registering cached schema source {}", name);
                sources.register(Arc::new(Self::new(name, root.clone())));
            }
        }
        Ok(sources)
    }
}

#[async_trait]
impl SchemaSource for DirectorySchemaSource {
    fn integration_type(&self) -> &str {
        &self.integration_type
    }

    async fn fetch_schema(
        &self,
        form_id: &FormId,
        item_id: &ItemId,
    ) -> SyncResult<Option<IntegrationSchema>> {
        let item = item_id.as_str();
        if item.starts_with('.') || item.contains(['/', '\\']) {
            return Err(SyncError::SchemaFetch(format!("item id not usable as a file name: {item}")));
        }
        let path = self.dir.join(format!("{item}.json"));
        debug!("Reading cached schema {} for form {}", path.display(), form_id);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SyncError::SchemaFetch(format!("{}: {e}", path.display()))),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SyncError::SchemaFetch(format!("{}: {e}", path.display())))
    }
}
