//! Error types for the core model.
//!
//! Domain-specific errors (`StoreError`, `OverrideError`, ...) live in their
//! respective crates. The CLI converges everything through `anyhow`.

use thiserror::Error;

/// Errors raised while converting user input into core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A textual value could not be parsed into a domain type.
    #[error("Invalid {field} '{value}': expected one of {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}
