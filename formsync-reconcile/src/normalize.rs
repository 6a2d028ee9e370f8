//! Tree normalizer - flattens provider schemas and content blocks into [`FieldMap`]s.
//!
//! Both sides end up in the same keyed shape so the diff can compare them
//! key by key. Nodes without an extractable name are skipped; this is never
//! an error because schemas routinely carry structural-only entries.

use formsync_model::{string_attr, strip_falsy, Attrs, ContentBlock, FieldMap, FieldNode, SchemaField};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ProtectionPolicy, ReconcileConfig};

/// Attribute read first when naming a content block.
pub const NAME_ATTR: &str = "name";

/// Flattens a provider schema into a keyed map, in schema order.
///
/// Each node's protected attributes come from its own
/// `<component>DisabledOptions` attribute.
pub fn normalize_schema(fields: &[SchemaField], config: &ReconcileConfig) -> FieldMap {
    let mut map = FieldMap::new();

    for field in fields {
        let Some(name) = schema_field_name(field, config) else {
            debug!("Skipping schema field without a name (component={})", field.component);
            continue;
        };
        let parent = schema_node(field, name, None, config);
        let parent_key = parent.key.clone();
        if !insert_unique(&mut map, parent) {
            continue;
        }

        for inner in &field.inner {
            let Some(inner_name) = schema_field_name(inner, config) else {
                debug!("Skipping unnamed inner field under {}", parent_key);
                continue;
            };
            if !inner.inner.is_empty() {
                debug!(
                    "Ignoring {} nested entries below {}: only one level is supported",
                    inner.inner.len(),
                    parent_key
                );
            }
            let child = schema_node(inner, inner_name, Some(&parent_key), config);
            insert_unique(&mut map, child);
        }
    }

    map
}

/// Flattens the field blocks of a content document into a keyed map.
///
/// Falsy attribute values are dropped so that "missing" and "explicitly empty"
/// compare equal. Any protected list the content carries is informational.
pub fn normalize_content(blocks: &[ContentBlock], config: &ReconcileConfig) -> FieldMap {
    let mut map = FieldMap::new();

    for block in blocks {
        let Some(parent) = content_node(block, None, config) else {
            debug!("Skipping content block without a name ({})", block.name);
            continue;
        };
        let parent_key = parent.key.clone();
        if !insert_unique(&mut map, parent) {
            continue;
        }

        for inner in &block.inner_blocks {
            let Some(child) = content_node(inner, Some(&parent_key), config) else {
                debug!("Skipping unnamed inner block under {}", parent_key);
                continue;
            };
            if !inner.inner_blocks.is_empty() {
                debug!("Ignoring blocks nested below {}: only one level is supported", child.key);
            }
            insert_unique(&mut map, child);
        }
    }

    map
}

fn schema_field_name(field: &SchemaField, config: &ReconcileConfig) -> Option<String> {
    field
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| string_attr(&field.attrs, &config.identity_attr(&field.component)))
        .map(str::to_string)
}

fn schema_node(
    field: &SchemaField,
    name: String,
    parent_key: Option<&str>,
    config: &ReconcileConfig,
) -> FieldNode {
    let mut protected = declared_protected(&field.component, &field.attrs, config);
    let identity = config.identity_attr(&field.component);
    // Only an identity the schema carries can be enforced.
    if protected.is_empty()
        && config.protection == ProtectionPolicy::RequireIdentity
        && field.attrs.contains_key(&identity)
    {
        protected.push(identity);
    }

    FieldNode {
        key: key_for(&name, parent_key, config),
        name,
        component: field.component.clone(),
        attrs: field.attrs.clone(),
        protected_attrs: protected,
        parent_key: parent_key.map(str::to_string),
    }
}

fn content_node(
    block: &ContentBlock,
    parent_key: Option<&str>,
    config: &ReconcileConfig,
) -> Option<FieldNode> {
    let component = block.component();
    if component.is_empty() {
        return None;
    }
    let name = string_attr(&block.attrs, NAME_ATTR)
        .or_else(|| string_attr(&block.attrs, &config.identity_attr(component)))?
        .to_string();
    let attrs = strip_falsy(&block.attrs);

    Some(FieldNode {
        key: key_for(&name, parent_key, config),
        name,
        component: component.to_string(),
        protected_attrs: declared_protected(component, &attrs, config),
        attrs,
        parent_key: parent_key.map(str::to_string),
    })
}

fn key_for(name: &str, parent_key: Option<&str>, config: &ReconcileConfig) -> String {
    match parent_key {
        Some(parent) => config.child_key(parent, name),
        None => name.to_string(),
    }
}

/// Reads `<component>DisabledOptions` as a list of fully-qualified attribute keys.
/// Accepts a list of strings or a single string; duplicates are dropped.
pub fn declared_protected(component: &str, attrs: &Attrs, config: &ReconcileConfig) -> Vec<String> {
    let entries: Vec<&str> = match attrs.get(&config.protected_list_attr(component)) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(single)) => vec![single.as_str()],
        _ => Vec::new(),
    };

    let mut protected: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(qualified) = config.qualify(component, entry) {
            if !protected.contains(&qualified) {
                protected.push(qualified);
            }
        }
    }
    protected
}

/// First occurrence of a key wins.
fn insert_unique(map: &mut FieldMap, node: FieldNode) -> bool {
    if map.contains_key(&node.key) {
        warn!("Duplicate field key {}, keeping the first occurrence", node.key);
        return false;
    }
    map.insert(node.key.clone(), node);
    true
}
