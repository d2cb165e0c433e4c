//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("{}", .errors.join("; "))]
    ValidationFailed {
        /// One `field.path: message` entry per violation, in validator order.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}

impl SchemaError {
    /// The individual violations, empty for non-validation errors.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::ValidationFailed { errors } => errors,
            Self::NotFound(_) | Self::Generation(_) => &[],
        }
    }
}
