//! Error types for the sync layer.

use formsync_types::{FormId, ItemId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that end a single form sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No usable form id was given.
    #[error("missing form id")]
    MissingFormId,

    /// The store has no content for the form.
    #[error("no content found for form {0}")]
    MissingContent(FormId),

    /// The content has no integration container or it names no provider.
    #[error("form {0} is not bound to an integration type")]
    MissingType(FormId),

    /// The integration container names no schema instance.
    #[error("form {0} is not bound to an integration item")]
    MissingItemId(FormId),

    /// Neither side has fields to reconcile.
    #[error("neither form {0} nor its integration schema has any fields")]
    MissingContentAndSchemaFields(FormId),

    /// The form has fields but the schema has none.
    #[error("integration schema for form {0} has no fields")]
    MissingSchemaFields(FormId),

    /// The fetched schema belongs to another provider or instance.
    #[error(
        "schema identity mismatch: content is bound to {expected_type}/{expected_item}, schema reports {found_type}/{found_item}"
    )]
    SchemaIdentityMismatch {
        expected_type: String,
        expected_item: ItemId,
        found_type: String,
        found_item: ItemId,
    },

    /// No schema source is registered for the integration type.
    #[error("no schema source registered for integration type {0}")]
    UnknownIntegration(String),

    /// The schema source failed.
    #[error("schema fetch error: {0}")]
    SchemaFetch(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serializing or writing the reconciled tree failed.
    #[error("failed to persist form {form_id}: {reason}")]
    PersistFailure { form_id: FormId, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Machine-readable error kind carried in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingFormId,
    MissingContent,
    MissingType,
    MissingItemId,
    MissingContentAndSchemaFields,
    MissingSchemaFields,
    SchemaIdentityMismatch,
    UnknownIntegration,
    SchemaFetch,
    Storage,
    PersistFailure,
    Serialization,
}

impl SyncError {
    /// The error's kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingFormId => ErrorCode::MissingFormId,
            Self::MissingContent(_) => ErrorCode::MissingContent,
            Self::MissingType(_) => ErrorCode::MissingType,
            Self::MissingItemId(_) => ErrorCode::MissingItemId,
            Self::MissingContentAndSchemaFields(_) => ErrorCode::MissingContentAndSchemaFields,
            Self::MissingSchemaFields(_) => ErrorCode::MissingSchemaFields,
            Self::SchemaIdentityMismatch { .. } => ErrorCode::SchemaIdentityMismatch,
            Self::UnknownIntegration(_) => ErrorCode::UnknownIntegration,
            Self::SchemaFetch(_) => ErrorCode::SchemaFetch,
            Self::Storage(_) => ErrorCode::Storage,
            Self::PersistFailure { .. } => ErrorCode::PersistFailure,
            Self::Serialization(_) => ErrorCode::Serialization,
        }
    }
}

impl From<formsync_storage::StorageError> for SyncError {
    fn from(err: formsync_storage::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
