//! Tree reconstructor - turns the flat output map back into a nested tree.

use formsync_model::{Attrs, ContentBlock, ContentDocument, FieldMap, FieldNode};
use formsync_types::ItemId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::normalize::NAME_ATTR;

/// Attribute on the integration container naming the provider.
pub const TYPE_ATTR: &str = "type";
/// Attribute on the integration container naming the schema instance.
pub const ITEM_ID_ATTR: &str = "itemId";

/// Block names used for the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockLayout {
    pub namespace: String,
    pub form_block: String,
    pub container_block: String,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            namespace: "formsync".to_string(),
            form_block: "form".to_string(),
            container_block: "integration".to_string(),
        }
    }
}

impl BlockLayout {
    /// `"<namespace>/<component>"`.
    pub fn block_name(&self, component: &str) -> String {
        format!("{}/{component}", self.namespace)
    }

    pub fn form_block_name(&self) -> String {
        self.block_name(&self.form_block)
    }

    pub fn container_block_name(&self) -> String {
        self.block_name(&self.container_block)
    }
}

/// A top-level field with its children, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputField {
    pub node: FieldNode,
    pub children: Vec<FieldNode>,
}

/// The nested tree handed to the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTree {
    pub integration_type: String,
    pub item_id: ItemId,
    pub fields: Vec<OutputField>,
}

/// Rebuilds the nested tree from the output map.
///
/// Top-level nodes keep the map's order; children are attached to their
/// parent in the order they are met. Children whose parent is not in the
/// map are dropped.
pub fn rebuild_tree(output: &FieldMap, integration_type: &str, item_id: &ItemId) -> OutputTree {
    let mut fields: Vec<OutputField> = output
        .values()
        .filter(|node| !node.is_child())
        .map(|node| OutputField {
            node: node.clone(),
            children: Vec::new(),
        })
        .collect();

    for child in output.values().filter(|node| node.is_child()) {
        let parent_key = child.parent_key.as_deref().unwrap_or_default();
        match fields.iter_mut().find(|f| f.node.key == parent_key) {
            Some(parent) => parent.children.push(child.clone()),
            None => warn!("Dropping {}: parent {} is not in the output", child.key, parent_key),
        }
    }

    OutputTree {
        integration_type: integration_type.to_string(),
        item_id: item_id.clone(),
        fields,
    }
}

impl OutputTree {
    /// Number of field nodes, children included.
    pub fn node_count(&self) -> usize {
        self.fields.iter().map(|f| 1 + f.children.len()).sum()
    }

    /// Lays the tree out as a content document:
    /// form block -> integration container -> field blocks -> child blocks.
    pub fn to_document(&self, layout: &BlockLayout) -> ContentDocument {
        let mut container_attrs = Attrs::new();
        container_attrs.insert(TYPE_ATTR.to_string(), Value::String(self.integration_type.clone()));
        container_attrs.insert(ITEM_ID_ATTR.to_string(), Value::String(self.item_id.to_string()));

        let mut container = ContentBlock::new(layout.container_block_name(), container_attrs);
        container.inner_blocks = self
            .fields
            .iter()
            .map(|field| {
                let mut block = field_block(&field.node, layout);
                block.inner_blocks = field.children.iter().map(|c| field_block(c, layout)).collect();
                block
            })
            .collect();

        let mut form = ContentBlock::new(layout.form_block_name(), Attrs::new());
        form.inner_blocks.push(container);
        ContentDocument::new(vec![form])
    }
}

/// The local name is written back so a reload yields the same key.
fn field_block(node: &FieldNode, layout: &BlockLayout) -> ContentBlock {
    let mut attrs = node.attrs.clone();
    attrs.insert(NAME_ATTR.to_string(), Value::String(node.name.clone()));
    ContentBlock::new(layout.block_name(&node.component), attrs)
}
