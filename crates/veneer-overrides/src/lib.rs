//! # veneer-overrides
//!
//! Per-node override management over a hierarchical scene.
//!
//! The pipeline, each stage depending only on the ones before it:
//! 1. [`path_map`]: deterministic, sibling-disambiguated `NodePath` for every node
//! 2. [`service`]: the per-model override document with merge/remove/reset,
//!    persisted through a [`veneer_store::KeyValueStore`]
//! 3. [`enrich`]: raw tree + paths + overrides -> display tree
//! 4. [`browse`]: restricted tree for end-user browsing
//!
//! [`codec`] converts the document to and from the portable export envelope.
//!
//! All traversals are depth-capped; exceeding the cap truncates silently.
//! The `_cooperative` variants yield to the tokio scheduler periodically and
//! produce the same output as their synchronous counterparts.

pub mod browse;
pub mod codec;
pub mod enrich;
pub mod error;
pub mod path_map;
pub mod service;

pub use browse::filter_for_browse;
pub use enrich::{enrich, enrich_cooperative};
pub use error::OverrideError;
pub use path_map::{PathMapping, build_path_mapping, build_path_mapping_cooperative};
pub use service::OverrideService;
