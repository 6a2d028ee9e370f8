//! Sync orchestrator - load, validate, reconcile, persist, report.
//!
//! Every failure is turned into an error [`SyncReport`] here; the
//! reconciliation steps underneath never fail.

use formsync_model::{ContentDocument, IntegrationSchema};
use formsync_reconcile::{diff_maps, normalize_content, normalize_schema, rebuild_tree, Diff};
use formsync_types::FormId;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::extract::{extract_binding, BoundContent};
use crate::report::{DiffSummary, SyncReport, SyncStage};
use crate::serializer::{JsonSerializer, Serializer};
use crate::source::SchemaSources;
use crate::store::ContentStore;

/// A validated form, ready to diff.
struct Prepared {
    form_id: FormId,
    bound: BoundContent,
    schema: IntegrationSchema,
}

/// Keeps persisted form content in step with provider schemas.
pub struct SyncOrchestrator {
    store: Arc<dyn ContentStore>,
    sources: SchemaSources,
    serializer: Arc<dyn Serializer>,
    config: SyncConfig,
}

impl SyncOrchestrator {
    /// Creates an orchestrator using the JSON serializer.
    pub fn new(store: Arc<dyn ContentStore>, sources: SchemaSources, config: SyncConfig) -> Self {
        Self {
            store,
            sources,
            serializer: Arc::new(JsonSerializer::default()),
            config,
        }
    }

    /// Replaces the serializer.
    #[must_use]
    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Reconciles one form against its provider schema.
    ///
    /// In preview mode nothing is written and the rebuilt document is
    /// returned in [`SyncReport::output_tree`].
    pub async fn sync_form(&self, form_id: &str, preview: bool) -> SyncReport {
        let prepared = match self.prepare(form_id).await {
            Ok(prepared) => prepared,
            Err((stage, err)) => {
                debug!("Sync of form {:?} stopped at {:?}: {}", form_id, stage, err);
                return SyncReport::failure(form_id.trim(), stage, &err, None);
            }
        };

        let diff = self.diff(&prepared);
        let mut summary = DiffSummary::from(&diff);
        let id = prepared.form_id.to_string();

        if diff.output.is_empty() {
            let message = if summary.has_changes() {
                format!("Schema yields no named fields, nothing written: {}", summary.describe())
            } else {
                "No changes detected: nothing to write".to_string()
            };
            return SyncReport::success(id, SyncStage::Skipped, message, summary);
        }
        if self.config.skip_unchanged_writes && !diff.has_changes() {
            return SyncReport::success(id, SyncStage::Skipped, "No changes detected", summary);
        }

        let document = rebuild_tree(&diff.output, &prepared.bound.integration_type, &prepared.bound.item_id)
            .to_document(&self.config.layout);

        let serialized = match self.serializer.serialize(&document) {
            Ok(serialized) => serialized,
            Err(err) => {
                let err = SyncError::PersistFailure {
                    form_id: prepared.form_id.clone(),
                    reason: err.to_string(),
                };
                return SyncReport::failure(id, SyncStage::Diffed, &err, Some(summary));
            }
        };
        summary.serialized = Some(serialized.clone());

        if preview {
            let mut report = SyncReport::success(
                id,
                SyncStage::Skipped,
                format!("Preview: {}", summary.describe()),
                summary,
            );
            report.output_tree = Some(document);
            return report;
        }

        if let Err(err) = self.store.write(&prepared.form_id, serialized).await {
            let err = SyncError::PersistFailure {
                form_id: prepared.form_id.clone(),
                reason: err.to_string(),
            };
            return SyncReport::failure(id, SyncStage::Diffed, &err, Some(summary));
        }

        info!("Synced form {}: {}", prepared.form_id, summary.describe());
        SyncReport::success(id, SyncStage::Persisted, format!("Form synced: {}", summary.describe()), summary)
    }

    /// Load, extract, fetch and validate.
    async fn prepare(&self, raw_id: &str) -> Result<Prepared, (SyncStage, SyncError)> {
        let form_id = FormId::parse(raw_id)
            .map_err(|_| SyncError::MissingFormId)
            .map_err(at(SyncStage::Start))?;

        let document: ContentDocument = self
            .store
            .load(&form_id)
            .await
            .and_then(|doc| {
                doc.filter(|d| !d.blocks.is_empty())
                    .ok_or_else(|| SyncError::MissingContent(form_id.clone()))
            })
            .map_err(at(SyncStage::Start))?;

        let bound = extract_binding(&form_id, &document, &self.config.layout).map_err(at(SyncStage::Loaded))?;
        debug!(
            "Form {} is bound to {}/{} with {} field block(s)",
            form_id,
            bound.integration_type,
            bound.item_id,
            bound.fields.len()
        );

        let schema = self.fetch(&form_id, &bound).await.map_err(at(SyncStage::Loaded))?;
        let schema = validate(&form_id, &bound, schema).map_err(at(SyncStage::Loaded))?;

        Ok(Prepared { form_id, bound, schema })
    }

    async fn fetch(&self, form_id: &FormId, bound: &BoundContent) -> SyncResult<Option<IntegrationSchema>> {
        let source = self
            .sources
            .get(&bound.integration_type)
            .ok_or_else(|| SyncError::UnknownIntegration(bound.integration_type.clone()))?;
        source.fetch_schema(form_id, &bound.item_id).await
    }

    fn diff(&self, prepared: &Prepared) -> Diff {
        let config = &self.config.reconcile;
        let integration = normalize_schema(&prepared.schema.fields, config);
        let content = normalize_content(&prepared.bound.fields, config);
        diff_maps(&integration, &content, config)
    }
}

/// Tags an error with the stage it ended the run at.
fn at(stage: SyncStage) -> impl FnOnce(SyncError) -> (SyncStage, SyncError) {
    move |err| (stage, err)
}

/// Field presence first, then schema identity.
fn validate(
    form_id: &FormId,
    bound: &BoundContent,
    schema: Option<IntegrationSchema>,
) -> SyncResult<IntegrationSchema> {
    let schema = schema.filter(|s| !s.fields.is_empty());
    let Some(schema) = schema else {
        return Err(if bound.fields.is_empty() {
            SyncError::MissingContentAndSchemaFields(form_id.clone())
        } else {
            SyncError::MissingSchemaFields(form_id.clone())
        });
    };

    if schema.integration_type != bound.integration_type || schema.item_id != bound.item_id {
        return Err(SyncError::SchemaIdentityMismatch {
            expected_type: bound.integration_type.clone(),
            expected_item: bound.item_id.clone(),
            found_type: schema.integration_type,
            found_item: schema.item_id,
        });
    }
    Ok(schema)
}
