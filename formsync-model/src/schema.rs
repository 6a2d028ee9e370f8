use formsync_types::ItemId;
use serde::{Deserialize, Serialize};

use crate::Attrs;

/// One field descriptor as reported by a provider mapper.
///
/// `inner` holds nested choices or sub-items; only one level is honored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub component: String,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<SchemaField>,
}

impl SchemaField {
    /// Shorthand for a named descriptor without children.
    pub fn named(name: impl Into<String>, component: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            name: Some(name.into()),
            component: component.into(),
            attrs,
            inner: Vec::new(),
        }
    }

    /// Appends a nested descriptor.
    #[must_use]
    pub fn with_inner(mut self, child: SchemaField) -> Self {
        self.inner.push(child);
        self
    }
}

/// The authoritative field description fetched for one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSchema {
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}
