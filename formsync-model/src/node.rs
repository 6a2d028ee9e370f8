use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Attrs;

/// Flat, insertion-ordered map of normalized fields keyed by [`FieldNode::key`].
pub type FieldMap = IndexMap<String, FieldNode>;

/// A single form field or field group in normalized form.
///
/// Top-level nodes are keyed by their own name; nested nodes by
/// `"<parentKey><separator><innerName>"` with `parent_key` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub key: String,
    /// Local name: equals `key` for top-level nodes, the inner name for children.
    pub name: String,
    /// Type discriminator ("input", "select", "checkbox", ...).
    pub component: String,
    pub attrs: Attrs,
    /// Fully-qualified attribute keys the schema owns, in declaration order.
    #[serde(default)]
    pub protected_attrs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
}

impl FieldNode {
    /// Creates a top-level node with no protected attributes.
    pub fn new(name: impl Into<String>, component: impl Into<String>, attrs: Attrs) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            component: component.into(),
            attrs,
            protected_attrs: Vec::new(),
            parent_key: None,
        }
    }

    /// Sets the protected attribute list.
    #[must_use]
    pub fn with_protected<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_attrs = attrs.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true for nodes nested under another node.
    pub fn is_child(&self) -> bool {
        self.parent_key.is_some()
    }
}
