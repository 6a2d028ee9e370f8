//! Core type definitions for formsync.
//!
//! This crate defines the identifiers shared by every formsync crate:
//! - [`FormId`]: the locally persisted form being reconciled
//! - [`ItemId`]: the provider-side schema instance a form is bound to
//!
//! Field trees, schemas and reports live in `formsync-model` and above.

mod ids;

pub use ids::{FormId, ItemId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("empty {0} identifier")]
    EmptyId(&'static str),
}
