//! Shared fixtures for veneer-overrides integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use veneer_core::scene::SceneNode;
use veneer_overrides::OverrideService;
use veneer_store::{KeyValueStore, MemoryStore, StoreError};

/// Memory store whose writes can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Backend("disk full".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(key).await
    }
}

/// A small building:
///
/// ```text
/// Site
/// ├── Level 1
/// │   ├── Wall
/// │   ├── Wall[1]
/// │   └── Mesh        (unnamed)
/// ├── Level 2
/// │   └── Wall
/// └── Services
/// ```
pub fn building() -> SceneNode {
    SceneNode::new("site", "Site", "Group").with_children(vec![
        SceneNode::new("l1", "Level 1", "Group").with_children(vec![
            SceneNode::new("l1-w0", "Wall", "Mesh"),
            SceneNode::new("l1-w1", "Wall", "Mesh"),
            SceneNode::new("l1-m", "", "Mesh"),
        ]),
        SceneNode::new("l2", "Level 2", "Group")
            .with_children(vec![SceneNode::new("l2-w0", "Wall", "Mesh")]),
        SceneNode::new("svc", "Services", "Group"),
    ])
}

/// A service over `store` with `building()` loaded as `model_key`.
pub async fn loaded<S: KeyValueStore>(store: S, model_key: &str) -> OverrideService<S> {
    let mut service = OverrideService::with_defaults(store).expect("service should build");
    service
        .init_for_model(model_key, building())
        .await
        .expect("model should load");
    service
}
