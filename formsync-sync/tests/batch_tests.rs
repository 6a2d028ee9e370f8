//! Batch sync and its summary.

mod common;

use common::*;
use formsync_storage::{FormStore, StoredForm};
use formsync_sync::{BatchItem, BatchReport, BatchSelection, BatchStatus, SchemaSources, SyncConfig, SyncOrchestrator};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn field(name: &str) -> formsync_model::ContentBlock {
    field_block("input", json!({"name": name, "inputName": name, "inputType": "text"}))
}

/// Forms "a" and "c" are bound to list-1, "b" to an item the source does not know
/// about, "page" is not a form at all.
fn orchestrator() -> (Arc<FormStore>, SyncOrchestrator) {
    init_tracing();
    let store = Arc::new(FormStore::open_in_memory());
    put_form(&store, "a", "Alpha", &bound_document("hubspot", json!("list-1"), vec![field("email")]));
    put_form(&store, "b", "Beta", &bound_document("hubspot", json!("list-2"), vec![field("email")]));
    put_form(&store, "c", "", &bound_document("hubspot", json!("list-1"), vec![]));
    store
        .put(&StoredForm::new(form_id("page"), "About us", "page"))
        .unwrap();

    let source = ScriptedSource::returning(
        "hubspot",
        Some(schema("hubspot", "list-1", vec![email_field("email")])),
    );
    let orchestrator = SyncOrchestrator::new(store.clone(), SchemaSources::new().with(source), SyncConfig::default());
    (store, orchestrator)
}

fn ids(items: &[BatchItem]) -> Vec<&str> {
    items.iter().map(|i| i.form_id.as_str()).collect()
}

#[tokio::test]
async fn test_all_covers_bound_forms_and_continues_on_failure() {
    let (_, orchestrator) = orchestrator();

    let report = orchestrator.sync_batch(BatchSelection::All).await.unwrap();

    assert_eq!(ids(&report.success), vec!["a", "c"]);
    assert_eq!(ids(&report.error), vec!["b"]);
    assert_eq!(report.error[0].title, "Beta");
    assert!(report.error[0].message.contains("list-2"));
    assert_eq!(report.summary(), BatchStatus::Warning);
}

#[tokio::test]
async fn test_selected_forms_in_given_order() {
    let (store, orchestrator) = orchestrator();

    let report = orchestrator
        .sync_batch(BatchSelection::Forms(vec!["c".into(), "a".into()]))
        .await
        .unwrap();

    assert_eq!(ids(&report.success), vec!["c", "a"]);
    assert!(report.error.is_empty());
    assert_eq!(report.summary(), BatchStatus::Success);
    assert_eq!(report.success[1].title, "Alpha");
    assert_eq!(stored_fields(&store, "c").len(), 1);
}

#[tokio::test]
async fn test_unknown_selected_form_is_an_error_entry() {
    let (_, orchestrator) = orchestrator();

    let report = orchestrator
        .sync_batch(BatchSelection::Forms(vec!["nope".into(), "b".into()]))
        .await
        .unwrap();

    assert_eq!(report.summary(), BatchStatus::Error);
    assert_eq!(ids(&report.error), vec!["nope", "b"]);
    assert_eq!(report.error[0].title, "");
}

#[tokio::test]
async fn test_empty_selection() {
    let (_, orchestrator) = orchestrator();

    let report = orchestrator.sync_batch(BatchSelection::Forms(vec![])).await.unwrap();

    assert_eq!(report, BatchReport::default());
    assert_eq!(report.summary(), BatchStatus::Empty);
    assert_eq!(report.message(), "No forms to sync");
}

#[test]
fn test_messages_prefer_titles() {
    let item = |id: &str, title: &str| BatchItem {
        form_id: id.into(),
        title: title.into(),
        message: String::new(),
    };
    let report = BatchReport {
        success: vec![item("1", "Contact")],
        error: vec![item("2", ""), item("3", "Survey")],
    };

    assert_eq!(report.message(), "Synced 1 form(s), 2 failed: 2, Survey");

    let all_failed = BatchReport {
        success: vec![],
        error: vec![item("2", "")],
    };
    assert_eq!(all_failed.message(), "All 1 form(s) failed: 2");

    let all_good = BatchReport {
        success: vec![item("1", "Contact")],
        error: vec![],
    };
    assert_eq!(all_good.message(), "Synced 1 form(s): Contact");
}
