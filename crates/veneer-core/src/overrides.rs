//! Per-node override records and the per-model override document.
//!
//! A `NodeOverride` is a closed four-field record: every field is optional and
//! unknown fields are rejected on deserialization. An override with no fields
//! set is equivalent to no override at all and is pruned from the document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::NodePath;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// MenuMode
// ---------------------------------------------------------------------------

/// Browse-mode marker for a node.
///
/// ```text
/// root     → node becomes a top-level entry point
/// disabled → node and its subtree are removed
/// hide     → node is removed, its children take its place
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MenuMode {
    Root,
    Disabled,
    Hide,
}

impl MenuMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Disabled => "disabled",
            Self::Hide => "hide",
        }
    }
}

impl fmt::Display for MenuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "disabled" => Ok(Self::Disabled),
            "hide" => Ok(Self::Hide),
            _ => Err(CoreError::InvalidValue {
                field: "menu",
                value: s.to_string(),
                expected: "root, disabled, hide",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// NodeOverride
// ---------------------------------------------------------------------------

/// User-specified replacements for one node, keyed by its `NodePath`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
}

impl NodeOverride {
    /// Number of defined fields. An explicit default (`visible: true`) still counts.
    #[must_use]
    pub const fn field_count(&self) -> usize {
        self.display_name.is_some() as usize
            + self.visible.is_some() as usize
            + self.menu.is_some() as usize
            + self.properties.is_some() as usize
    }

    /// True when no field is defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Shallow field-level merge: every field defined in `partial` replaces
    /// the current one. `properties` is replaced as a whole map.
    pub fn merge(&mut self, partial: Self) {
        if partial.display_name.is_some() {
            self.display_name = partial.display_name;
        }
        if partial.visible.is_some() {
            self.visible = partial.visible;
        }
        if partial.menu.is_some() {
            self.menu = partial.menu;
        }
        if partial.properties.is_some() {
            self.properties = partial.properties;
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    #[must_use]
    pub fn with_menu(mut self, menu: MenuMode) -> Self {
        self.menu = Some(menu);
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// OverrideDocument
// ---------------------------------------------------------------------------

/// The complete set of overrides for one logical model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverrideDocument {
    #[schemars(extend("minLength" = 1))]
    pub model_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub overrides: BTreeMap<NodePath, NodeOverride>,
}

impl OverrideDocument {
    /// Create an empty document with both timestamps set to `now`.
    #[must_use]
    pub fn new(model_key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            model_key: model_key.into(),
            created_at: now,
            updated_at: now,
            overrides: BTreeMap::new(),
        }
    }

    /// The entry stored for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&NodeOverride> {
        self.overrides.get(path)
    }

    /// Whether `path` carries at least one defined override field.
    #[must_use]
    pub fn has_override(&self, path: &str) -> bool {
        self.get(path).is_some_and(|o| !o.is_empty())
    }

    /// Merge `partial` into the entry for `path`, creating it if absent.
    /// An entry left without fields is removed.
    pub fn merge(&mut self, path: &str, partial: NodeOverride) {
        let entry = self.overrides.entry(path.to_string()).or_default();
        entry.merge(partial);
        if entry.is_empty() {
            self.overrides.remove(path);
        }
    }

    /// Remove the whole entry for `path`. Returns the removed entry.
    pub fn remove(&mut self, path: &str) -> Option<NodeOverride> {
        self.overrides.remove(path)
    }

    /// Drop the `visible` field from every entry and prune emptied entries.
    /// Returns how many entries lost a `visible` field.
    pub fn clear_visibility(&mut self) -> usize {
        let mut cleared = 0;
        for entry in self.overrides.values_mut() {
            if entry.visible.take().is_some() {
                cleared += 1;
            }
        }
        self.prune();
        cleared
    }

    /// Remove every field-less entry.
    pub fn prune(&mut self) {
        self.overrides.retain(|_, entry| !entry.is_empty());
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
