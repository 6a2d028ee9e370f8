//! Storage layer for formsync.
//!
//! Persists one document per form, together with the form's title and the
//! content type the host application tags it with.
//!
//! # Architecture
//!
//! - [`FormStore::open_in_memory`] keeps forms in a map (tests, previews)
//! - [`FormStore::open`] keeps one `<formId>.json` file per form in a directory
//! - Document bodies are stored in their serialized form and parsed on load

mod error;
mod form_store;

pub use error::{StorageError, StorageResult};
pub use form_store::{FormStore, StoredForm};
