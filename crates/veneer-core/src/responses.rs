//! CLI response types returned as JSON by `vnr` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::NodePath;
use crate::enhanced::EnhancedNode;
use crate::overrides::NodeOverride;

/// Outcome of a mutating command. Validation and precondition failures are
/// rendered through this shape instead of aborting the process.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// One id-to-path assignment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PathEntry {
    pub id: String,
    pub path: NodePath,
}

/// Response from `vnr paths`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PathMappingResponse {
    pub paths: Vec<PathEntry>,
}

/// Response from `vnr tree`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    pub model_key: String,
    pub browse: bool,
    pub nodes: Vec<EnhancedNode>,
}

/// Response from `vnr set` and `vnr remove`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverrideResponse {
    pub model_key: String,
    pub path: NodePath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<NodeOverride>,
    /// Whether `path` resolves to a node of the loaded tree.
    pub resolved: bool,
}

/// Response from `vnr last`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastModelResponse {
    pub model_key: Option<String>,
}
