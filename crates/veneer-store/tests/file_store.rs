//! File-backed store behaviour against a temp directory.

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use veneer_config::{StoreBackend, StoreConfig};
use veneer_store::{ConfiguredStore, FileStore, KeyValueStore};

#[tokio::test]
async fn values_survive_a_new_store_instance() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().to_path_buf()).unwrap();
    store.put("overrides/tower", r#"{"a":1}"#).await.unwrap();

    let reopened = FileStore::new(temp.path().to_path_buf()).unwrap();
    assert_eq!(
        reopened.get("overrides/tower").await.unwrap().as_deref(),
        Some(r#"{"a":1}"#)
    );
    assert!(temp.path().join("overrides%2Ftower.json").is_file());
}

#[tokio::test]
async fn missing_key_reads_as_none_and_deletes_cleanly() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().to_path_buf()).unwrap();
    assert_eq!(store.get("absent").await.unwrap(), None);
    store.delete("absent").await.unwrap();
}

#[tokio::test]
async fn put_replaces_and_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().to_path_buf()).unwrap();
    store.put("k", "one").await.unwrap();
    store.put("k", "two").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));

    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());

    store.delete("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn configured_store_resolves_relative_data_dir() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::File,
        data_dir: "state".into(),
    };
    let store = ConfiguredStore::from_config(&config, temp.path()).unwrap();
    store.put("last_active_model", "tower").await.unwrap();
    assert!(temp.path().join("state/last_active_model.json").is_file());
}

#[tokio::test]
async fn configured_memory_store_round_trips() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Memory,
        data_dir: String::new(),
    };
    let store = ConfiguredStore::from_config(&config, temp.path()).unwrap();
    store.put("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
}
