//! Display-ready tree produced by enrichment. Never persisted.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::NodePath;
use crate::overrides::MenuMode;

/// A scene node with its effective (overridden or default) properties.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedNode {
    pub id: String,
    pub path: NodePath,
    pub original_name: String,
    pub display_name: String,
    pub kind: String,
    pub children: Vec<Self>,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuMode>,
    pub properties: BTreeMap<String, String>,
    pub has_override: bool,
}

