//! Field schema reconciliation for formsync.
//!
//! Keeps a persisted field tree in step with the authoritative schema a
//! provider reports for the same form, while preserving user edits that the
//! schema does not own.
//!
//! # Pipeline
//!
//! 1. [`normalize_schema`] / [`normalize_content`] flatten both trees into
//!    keyed [`FieldMap`](formsync_model::FieldMap)s.
//! 2. [`diff_maps`] walks the union of keys and, for keys present on both
//!    sides, runs [`merge_nodes`]: structural ("protected") attributes are
//!    forced back to the schema value, everything else is left alone.
//! 3. [`rebuild_tree`] nests the output map again, ready to serialize.
//!
//! All steps are pure and never fail; malformed nodes are skipped.
//!
//! # Example
//!
//! ```
//! use formsync_model::SchemaField;
//! use formsync_reconcile::{normalize_content, normalize_schema, diff_maps, ReconcileConfig};
//! use serde_json::json;
//!
//! let config = ReconcileConfig::default();
//! let attrs = json!({"inputName": "email", "inputDisabledOptions": ["Name"]});
//! let schema = vec![SchemaField::named("email", "input", attrs.as_object().unwrap().clone())];
//!
//! let diff = diff_maps(&normalize_schema(&schema, &config), &normalize_content(&[], &config), &config);
//! assert_eq!(diff.added, vec!["email"]);
//! ```

mod config;
mod diff;
mod merge;
mod normalize;
mod rebuild;

pub use config::{ProtectionPolicy, ReconcileConfig};
pub use diff::{diff_maps, Diff};
pub use merge::{merge_nodes, MergeOutcome, ReplaceReason, Verdict};
pub use normalize::{declared_protected, normalize_content, normalize_schema, NAME_ATTR};
pub use rebuild::{rebuild_tree, BlockLayout, OutputField, OutputTree, ITEM_ID_ATTR, TYPE_ATTR};

use formsync_model::{ContentBlock, SchemaField};

/// Normalizes both sides and diffs them in one call.
pub fn reconcile(schema: &[SchemaField], content: &[ContentBlock], config: &ReconcileConfig) -> Diff {
    let integration = normalize_schema(schema, config);
    let current = normalize_content(content, config);
    diff_maps(&integration, &current, config)
}
