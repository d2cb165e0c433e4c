//! # veneer-core
//!
//! Core types, store keys, and error types for Veneer.
//!
//! This crate provides the foundational types shared across all Veneer crates:
//! - The read-only scene input (`SceneNode`)
//! - The override model (`NodeOverride`, `MenuMode`, `OverrideDocument`)
//! - The derived display tree (`EnhancedNode`)
//! - The portable export envelope (`ExportEnvelope`)
//! - Key-value store key helpers
//! - Traversal limits shared by the tree algorithms
//! - Cross-cutting error types
//! - CLI response types

pub mod enhanced;
pub mod envelope;
pub mod errors;
pub mod keys;
pub mod overrides;
pub mod responses;
pub mod scene;
pub mod traversal;

/// Lineage-derived key under which overrides are stored, e.g. `Level 1/Wall[2]`.
pub type NodePath = String;
