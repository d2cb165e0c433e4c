//! File-backed key-value store.
//!
//! Each key maps to `{data_dir}/{encoded key}.json`. Keys are URL-encoded,
//! so `overrides/tower` lands in `overrides%2Ftower.json`. Writes go to a sibling temp file first and are
//! renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::KeyValueStore;
use crate::error::StoreError;

/// Stores each value in its own file under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&data_dir).map_err(|e| StoreError::io("<data_dir>", e))?;
        Ok(Self { data_dir })
    }

    /// The directory where value files are stored.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File that holds the value for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::io(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(key, e))?;
        tracing::debug!(key, bytes = value.len(), "file store put");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("last_active_model", "last_active_model.json")]
    #[case("overrides/tower", "overrides%2Ftower.json")]
    #[case("overrides/a b", "overrides%2Fa%20b.json")]
    #[case("overrides/étage~2", "overrides%2F%C3%A9tage~2.json")]
    #[case("overrides/../up", "overrides%2F..%2Fup.json")]
    fn encodes_keys(#[case] key: &str, #[case] expected: &str) {
        let temp = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf()).unwrap();
        let path = store.path_for(key);
        assert_eq!(path.parent(), Some(temp.path()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(expected));
    }

    #[test]
    fn new_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("nested/store");
        let store = FileStore::new(dir.clone()).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.data_dir(), dir.as_path());
    }
}
