//! Shared builders for reconcile tests.

#![allow(dead_code)]

use formsync_model::{Attrs, ContentBlock, SchemaField};
use serde_json::Value;

/// Unwraps a `json!({...})` literal into an attribute bag.
pub fn attrs(value: Value) -> Attrs {
    value.as_object().cloned().expect("attrs must be a JSON object")
}

/// A named schema descriptor.
pub fn schema_field(name: &str, component: &str, value: Value) -> SchemaField {
    SchemaField::named(name, component, attrs(value))
}

/// A content field block in the default `formsync/` namespace.
pub fn block(component: &str, value: Value) -> ContentBlock {
    ContentBlock::new(format!("formsync/{component}"), attrs(value))
}

/// A content field block with children.
pub fn block_with(component: &str, value: Value, children: Vec<ContentBlock>) -> ContentBlock {
    let mut b = block(component, value);
    b.inner_blocks = children;
    b
}
