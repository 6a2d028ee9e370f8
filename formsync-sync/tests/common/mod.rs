//! Shared fixtures for sync tests.

#![allow(dead_code)]

use async_trait::async_trait;
use formsync_model::{Attrs, ContentBlock, ContentDocument, IntegrationSchema, SchemaField, SerializedTree};
use formsync_storage::{FormStore, StoredForm};
use formsync_sync::{ContentStore, FormListing, SchemaSource, SyncError, SyncResult};
use formsync_types::{FormId, ItemId};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CONTENT_TYPE: &str = "formsync_form";

/// Installs a test log subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn attrs(value: Value) -> Attrs {
    value.as_object().cloned().expect("attrs must be a JSON object")
}

pub fn form_id(s: &str) -> FormId {
    FormId::parse(s).unwrap()
}

pub fn item_id(s: &str) -> ItemId {
    ItemId::parse(s).unwrap()
}

pub fn field_block(component: &str, value: Value) -> ContentBlock {
    ContentBlock::new(format!("formsync/{component}"), attrs(value))
}

/// form block -> integration container -> the given field blocks.
pub fn bound_document(integration_type: &str, item: Value, fields: Vec<ContentBlock>) -> ContentDocument {
    let mut container = ContentBlock::new(
        "formsync/integration",
        attrs(json!({"type": integration_type, "itemId": item})),
    );
    container.inner_blocks = fields;
    let mut form = ContentBlock::new("formsync/form", Attrs::new());
    form.inner_blocks.push(container);
    ContentDocument::new(vec![form])
}

pub fn email_field(input_type: &str) -> SchemaField {
    SchemaField::named(
        "email",
        "input",
        attrs(json!({
            "inputName": "email",
            "inputType": input_type,
            "inputFieldLabel": "Email",
            "inputDisabledOptions": ["Name", "Type"]
        })),
    )
}

pub fn company_field() -> SchemaField {
    SchemaField::named(
        "company",
        "input",
        attrs(json!({"inputName": "company", "inputType": "text", "inputDisabledOptions": ["Name", "Type"]})),
    )
}

pub fn schema(integration_type: &str, item: &str, fields: Vec<SchemaField>) -> IntegrationSchema {
    IntegrationSchema {
        integration_type: integration_type.to_string(),
        item_id: item_id(item),
        fields,
    }
}

/// Stores a form with the given document in a fresh in-memory store.
pub fn store_with(id: &str, title: &str, document: &ContentDocument) -> Arc<FormStore> {
    let store = Arc::new(FormStore::open_in_memory());
    put_form(&store, id, title, document);
    store
}

pub fn put_form(store: &FormStore, id: &str, title: &str, document: &ContentDocument) {
    let form = StoredForm::new(form_id(id), title, CONTENT_TYPE)
        .with_document(document)
        .unwrap();
    store.put(&form).unwrap();
}

/// The field blocks inside a stored form's integration container.
pub fn stored_fields(store: &FormStore, id: &str) -> Vec<ContentBlock> {
    let doc = store.load_document(&form_id(id)).unwrap().unwrap();
    doc.blocks[0].inner_blocks[0].inner_blocks.clone()
}

/// A schema source returning a fixed answer and counting calls.
pub struct ScriptedSource {
    integration_type: String,
    answer: Mutex<SyncResult<Option<IntegrationSchema>>>,
    pub calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn returning(integration_type: &str, schema: Option<IntegrationSchema>) -> Arc<Self> {
        Arc::new(Self {
            integration_type: integration_type.to_string(),
            answer: Mutex::new(Ok(schema)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(integration_type: &str, reason: &str) -> Arc<Self> {
        Arc::new(Self {
            integration_type: integration_type.to_string(),
            answer: Mutex::new(Err(SyncError::SchemaFetch(reason.to_string()))),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, schema: Option<IntegrationSchema>) {
        *self.answer.lock().unwrap() = Ok(schema);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaSource for ScriptedSource {
    fn integration_type(&self) -> &str {
        &self.integration_type
    }

    async fn fetch_schema(&self, _form_id: &FormId, _item_id: &ItemId) -> SyncResult<Option<IntegrationSchema>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.answer.lock().unwrap() {
            Ok(schema) => Ok(schema.clone()),
            Err(e) => Err(SyncError::SchemaFetch(e.to_string())),
        }
    }
}

/// Wraps a store and refuses every write.
pub struct ReadOnlyStore {
    pub inner: Arc<FormStore>,
    pub write_attempts: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new(inner: Arc<FormStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            write_attempts: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ContentStore for ReadOnlyStore {
    async fn load(&self, form_id: &FormId) -> SyncResult<Option<ContentDocument>> {
        self.inner.load(form_id).await
    }

    async fn write(&self, _form_id: &FormId, _tree: SerializedTree) -> SyncResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(SyncError::Storage("read-only store".to_string()))
    }

    async fn list_forms(&self) -> SyncResult<Vec<FormListing>> {
        self.inner.list_forms().await
    }
}
