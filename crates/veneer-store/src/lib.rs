//! # veneer-store
//!
//! Key-value persistence for Veneer.
//!
//! The override core only needs `get`, `put` and `delete` over string keys and
//! string (JSON) values. This crate defines that seam as [`KeyValueStore`] and
//! ships two backends:
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`FileStore`]: one file per key under a data directory
//!
//! [`ConfiguredStore`] picks a backend from `veneer-config`.

pub mod configured;
pub mod error;
pub mod file;
pub mod memory;

use std::future::Future;

pub use configured::ConfiguredStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Asynchronous key-value collaborator used to persist override documents.
///
/// Implementations must treat a missing key as `Ok(None)` on `get` and as a
/// no-op on `delete`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove `key`.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
