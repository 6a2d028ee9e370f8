//! Protected attribute merger.
//!
//! Given the schema node and the content node for one key, decides between
//! keeping the content node (with schema-owned attributes patched back in)
//! and replacing it wholesale with the schema node.

use formsync_model::{is_falsy, FieldNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReconcileConfig;

/// Why a content node was replaced by its schema node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ReplaceReason {
    /// The component type changed; attribute-level merge is not meaningful.
    ComponentChanged { from: String, to: String },
    /// The schema declares a protected attribute it does not carry.
    MissingSchemaAttr { attr: String },
    /// The identity attribute differs; the field was renamed underneath.
    IdentityChanged { attr: String },
}

/// Outcome of comparing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Replace(ReplaceReason),
}

/// Result of [`merge_nodes`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The schema node on `Replace`, the patched content node on `Keep`.
    pub merged: FieldNode,
    /// Protected attributes copied from the schema, in declaration order.
    pub changed_attrs: Vec<String>,
    pub verdict: Verdict,
}

impl MergeOutcome {
    fn replace(integration: &FieldNode, reason: ReplaceReason) -> Self {
        Self {
            merged: integration.clone(),
            changed_attrs: Vec::new(),
            verdict: Verdict::Replace(reason),
        }
    }
}

/// Merges a schema node into the content node sharing its key.
///
/// Only the schema node's protected list is consulted. Protected attributes
/// are walked in declaration order; the first condition calling for a
/// replacement stops the walk, every other drift is patched and recorded.
pub fn merge_nodes(
    integration: &FieldNode,
    content: &FieldNode,
    config: &ReconcileConfig,
) -> MergeOutcome {
    debug_assert_eq!(integration.key, content.key);

    if integration.component != content.component {
        return MergeOutcome::replace(
            integration,
            ReplaceReason::ComponentChanged {
                from: content.component.clone(),
                to: integration.component.clone(),
            },
        );
    }

    let identity = config.identity_attr(&integration.component);
    let mut merged = content.clone();
    let mut changed_attrs = Vec::new();

    for attr in &integration.protected_attrs {
        let Some(schema_value) = integration.attrs.get(attr) else {
            debug!("Schema node {} declares {} as protected but lacks it", integration.key, attr);
            return MergeOutcome::replace(
                integration,
                ReplaceReason::MissingSchemaAttr { attr: attr.clone() },
            );
        };

        match content.attrs.get(attr) {
            // An empty schema value and a missing content value both mean "unset".
            None if is_falsy(schema_value) => {}
            None => {
                merged.attrs.insert(attr.clone(), schema_value.clone());
                changed_attrs.push(attr.clone());
            }
            Some(content_value) if content_value == schema_value => {}
            Some(_) if *attr == identity => {
                return MergeOutcome::replace(
                    integration,
                    ReplaceReason::IdentityChanged { attr: attr.clone() },
                );
            }
            Some(_) => {
                merged.attrs.insert(attr.clone(), schema_value.clone());
                changed_attrs.push(attr.clone());
            }
        }
    }

    MergeOutcome {
        merged,
        changed_attrs,
        verdict: Verdict::Keep,
    }
}
