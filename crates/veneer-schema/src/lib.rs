//! # veneer-schema
//!
//! JSON Schema generation, validation, and registry for Veneer.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for the model types
//! - Validation that collects every violation as a `field.path: message` string
//! - Schema export for external tooling (`vnr schema` command)
//!
//! ## Architecture
//!
//! Model types are defined in `veneer-core` with `#[derive(JsonSchema)]`.
//! This crate generates strict schemas from them (optional fields may be
//! omitted but never `null`) and validates untrusted JSON before it is
//! deserialized.

pub mod error;
pub mod registry;
pub mod violation;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
