//! Raw scene hierarchy supplied by the rendering engine.
//!
//! Veneer never mutates a `SceneNode`; it only reads names, kinds and sibling
//! order to derive paths and display trees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One element of the external scene tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Stable identifier, unique within one snapshot.
    pub id: String,
    /// May be empty; the kind is used for path segments in that case.
    #[serde(default)]
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub children: Vec<Self>,
    /// Engine-side visibility. Not consulted by enrichment.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}

impl SceneNode {
    /// Create a visible leaf node.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            children: Vec::new(),
            visible: true,
        }
    }

    /// Builder-style helper to attach children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// The name used for path segments: the node name, or its kind when unnamed.
    #[must_use]
    pub fn base_name(&self) -> &str {
        if self.name.is_empty() {
            &self.kind
        } else {
            &self.name
        }
    }
}
