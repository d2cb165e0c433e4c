//! Persistence error types for veneer-store.

use thiserror::Error;

/// Errors from key-value store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed for a key.
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend refused or failed the operation.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}
