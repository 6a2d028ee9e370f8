//! Diff orchestrator - classifies every key of the two maps.

use formsync_model::FieldMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReconcileConfig;
use crate::merge::{merge_nodes, ReplaceReason, Verdict};

/// Key classification plus the merged output map.
///
/// `output` only ever holds schema keys, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub replaced: Vec<String>,
    /// Key -> protected attributes patched from the schema.
    pub changed: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub replace_reasons: IndexMap<String, ReplaceReason>,
    #[serde(skip)]
    pub output: FieldMap,
}

impl Diff {
    /// True when any bucket is non-empty.
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.removed.is_empty()
            && self.replaced.is_empty()
            && self.changed.is_empty())
    }
}

/// Walks the union of keys, schema order first, then content-only keys.
pub fn diff_maps(integration: &FieldMap, content: &FieldMap, config: &ReconcileConfig) -> Diff {
    let mut diff = Diff::default();

    for (key, schema_node) in integration {
        let Some(content_node) = content.get(key) else {
            diff.added.push(key.clone());
            diff.output.insert(key.clone(), schema_node.clone());
            continue;
        };

        let outcome = merge_nodes(schema_node, content_node, config);
        match outcome.verdict {
            Verdict::Replace(reason) => {
                debug!("Replacing {}: {:?}", key, reason);
                diff.replaced.push(key.clone());
                diff.replace_reasons.insert(key.clone(), reason);
                diff.output.insert(key.clone(), schema_node.clone());
            }
            Verdict::Keep if !outcome.changed_attrs.is_empty() => {
                debug!("Patched {} on {}", outcome.changed_attrs.join(", "), key);
                diff.changed.insert(key.clone(), outcome.changed_attrs);
                diff.output.insert(key.clone(), outcome.merged);
            }
            Verdict::Keep => {
                diff.output.insert(key.clone(), content_node.clone());
            }
        }
    }

    diff.removed = content
        .keys()
        .filter(|key| !integration.contains_key(*key))
        .cloned()
        .collect();

    diff
}
