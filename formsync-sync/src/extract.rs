//! Locates the integration container inside a content document.

use formsync_model::{string_attr, ContentBlock, ContentDocument};
use formsync_reconcile::{BlockLayout, ITEM_ID_ATTR, TYPE_ATTR};
use formsync_types::{FormId, ItemId};
use serde_json::Value;

use crate::error::{SyncError, SyncResult};

/// What a form's content says it is bound to, plus its raw field blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundContent {
    pub integration_type: String,
    pub item_id: ItemId,
    pub fields: Vec<ContentBlock>,
}

/// Finds the container at the root or directly under the form block, and
/// reads its `type` and `itemId` attributes.
pub fn extract_binding(
    form_id: &FormId,
    document: &ContentDocument,
    layout: &BlockLayout,
) -> SyncResult<BoundContent> {
    let container_name = layout.container_block_name();
    let container = document
        .blocks
        .iter()
        .chain(document.blocks.iter().flat_map(|b| b.inner_blocks.iter()))
        .find(|b| b.name == container_name)
        .ok_or_else(|| SyncError::MissingType(form_id.clone()))?;

    let integration_type = string_attr(&container.attrs, TYPE_ATTR)
        .ok_or_else(|| SyncError::MissingType(form_id.clone()))?
        .to_string();

    let item_id = match container.attrs.get(ITEM_ID_ATTR) {
        Some(Value::String(s)) => ItemId::parse(s).ok(),
        Some(Value::Number(n)) => ItemId::parse(&n.to_string()).ok(),
        _ => None,
    }
    .ok_or_else(|| SyncError::MissingItemId(form_id.clone()))?;

    Ok(BoundContent {
        integration_type,
        item_id,
        fields: container.inner_blocks.clone(),
    })
}
