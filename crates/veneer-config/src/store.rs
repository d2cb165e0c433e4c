//! Key-value store backend configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which key-value backend persists override documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One JSON file per key under `data_dir`.
    #[default]
    File,
    /// Process-local map; nothing survives the process.
    Memory,
}

fn default_data_dir() -> String {
    ".veneer/store".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend. Relative paths resolve against the project root.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl StoreConfig {
    /// Resolve `data_dir` against `project_root` unless it is already absolute.
    #[must_use]
    pub fn resolved_data_dir(&self, project_root: &Path) -> PathBuf {
        let dir = PathBuf::from(&self.data_dir);
        if dir.is_absolute() {
            dir
        } else {
            project_root.join(dir)
        }
    }
}
