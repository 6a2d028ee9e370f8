use serde::{Deserialize, Serialize};

use crate::Attrs;

/// A node of the persisted block tree.
///
/// `name` is the type discriminator, `"<namespace>/<component>"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub name: String,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub inner_blocks: Vec<ContentBlock>,
}

impl ContentBlock {
    pub fn new(name: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            name: name.into(),
            attrs,
            inner_blocks: Vec::new(),
        }
    }

    /// Splits the discriminator into `(namespace, component)`.
    /// A discriminator without a slash has an empty namespace.
    pub fn split_name(&self) -> (&str, &str) {
        match self.name.rsplit_once('/') {
            Some((ns, component)) => (ns, component),
            None => ("", self.name.as_str()),
        }
    }

    /// The component part of the discriminator.
    pub fn component(&self) -> &str {
        self.split_name().1
    }
}

/// A persisted form document: an ordered list of root blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl ContentDocument {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }
}

/// Opaque serialized document, as written to a content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedTree(pub String);

impl SerializedTree {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
