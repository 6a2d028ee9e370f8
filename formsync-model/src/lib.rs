//! Field tree model for formsync.
//!
//! Defines the shapes every reconciliation step works on:
//! - [`FieldNode`] / [`FieldMap`]: the flat, keyed representation of a form's fields
//! - [`SchemaField`] / [`IntegrationSchema`]: the provider's authoritative field description
//! - [`ContentBlock`] / [`ContentDocument`]: the persisted, user-editable block tree
//! - [`Attrs`] helpers for attribute bags and "falsy" values
//!
//! These types carry no behavior beyond accessors; the reconciliation
//! algorithm itself lives in `formsync-reconcile`.

mod attrs;
mod content;
mod node;
mod schema;

pub use attrs::{is_falsy, string_attr, strip_falsy, Attrs};
pub use content::{ContentBlock, ContentDocument, SerializedTree};
pub use node::{FieldMap, FieldNode};
pub use schema::{IntegrationSchema, SchemaField};
