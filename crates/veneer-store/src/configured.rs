//! Backend selection from configuration.

use std::path::Path;

use veneer_config::{StoreBackend, StoreConfig};

use crate::error::StoreError;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::KeyValueStore;

/// The store chosen by `[store] backend`.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl ConfiguredStore {
    /// Build the configured backend. File stores resolve `data_dir` against `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file store directory cannot be created.
    pub fn from_config(config: &StoreConfig, project_root: &Path) -> Result<Self, StoreError> {
        match config.backend {
            StoreBackend::File => {
                let dir = config.resolved_data_dir(project_root);
                tracing::debug!(dir = %dir.display(), "using file store");
                Ok(Self::File(FileStore::new(dir)?))
            }
            StoreBackend::Memory => {
                tracing::debug!("using memory store");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }
}

impl KeyValueStore for ConfiguredStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::File(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.put(key, value).await,
            Self::Memory(store) => store.put(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.delete(key).await,
            Self::Memory(store) => store.delete(key).await,
        }
    }
}
