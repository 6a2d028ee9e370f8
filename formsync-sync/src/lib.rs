//! Form schema sync for formsync.
//!
//! Keeps each stored form's fields in step with the schema its third-party
//! provider (HubSpot, Airtable, Jira, ...) currently reports.
//!
//! # Components
//!
//! - **Store**: [`ContentStore`] reads and writes form documents
//! - **Source**: [`SchemaSource`] fetches a provider schema; one per integration type
//! - **Serializer**: [`Serializer`] turns the rebuilt document into the stored format
//! - **Orchestrator**: [`SyncOrchestrator`] runs a single form, a batch, or previews
//! - **Trigger**: [`SyncOnEditorOpen`] syncs whenever a form's editor is opened
//!
//! ## Sync Process
//!
//! 1. **Load**: read the form document
//! 2. **Extract**: find the integration container (`type`, `itemId`, field blocks)
//! 3. **Fetch**: ask the registered source for the schema
//! 4. **Validate**: both sides have fields; the schema belongs to this binding
//! 5. **Diff**: reconcile the two field trees
//! 6. **Persist**: rebuild, serialize and write (unless previewing)
//! 7. **Report**: return a [`SyncReport`]
//!
//! # Example
//!
//! ```
//! use formsync_storage::FormStore;
//! use formsync_sync::{SchemaSources, SyncConfig, SyncOrchestrator};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FormStore::open_in_memory());
//! let orchestrator = SyncOrchestrator::new(store, SchemaSources::new(), SyncConfig::default());
//! assert_eq!(orchestrator.config().content_type, "formsync_form");
//! ```

mod batch;
mod config;
mod error;
mod extract;
mod orchestrator;
mod report;
mod serializer;
mod source;
mod store;
mod trigger;

pub use batch::BatchSelection;
pub use config::SyncConfig;
pub use error::{ErrorCode, SyncError, SyncResult};
pub use extract::{extract_binding, BoundContent};
pub use orchestrator::SyncOrchestrator;
pub use report::{BatchItem, BatchReport, BatchStatus, DiffSummary, SyncReport, SyncStage, SyncStatus};
pub use serializer::{JsonSerializer, Serializer};
pub use source::{DirectorySchemaSource, SchemaSource, SchemaSources};
pub use store::{ContentStore, FormListing};
pub use trigger::{EditorObserver, SyncOnEditorOpen};
