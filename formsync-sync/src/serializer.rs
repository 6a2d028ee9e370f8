use formsync_model::{ContentDocument, SerializedTree};

use crate::error::SyncResult;

/// Turns a rebuilt document into the store's persisted format.
pub trait Serializer: Send + Sync {
    fn serialize(&self, document: &ContentDocument) -> SyncResult<SerializedTree>;
}

/// JSON serializer, compact unless `pretty` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl Serializer for JsonSerializer {
    fn serialize(&self, document: &ContentDocument) -> SyncResult<SerializedTree> {
        let raw = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(SerializedTree(raw))
    }
}
