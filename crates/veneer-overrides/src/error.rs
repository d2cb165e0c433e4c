//! Error types for override operations.

use thiserror::Error;
use veneer_schema::SchemaError;
use veneer_store::StoreError;

/// Errors from the override service and codec.
///
/// `Validation` and `Precondition` leave in-memory state untouched.
/// `Persistence` is raised after the in-memory mutation has already been
/// applied; it is never rolled back.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// An import document did not conform. Carries every violation, `"; "`-joined.
    #[error("{0}")]
    Validation(String),

    /// The operation needs a loaded model.
    #[error("{0}")]
    Precondition(String),

    /// The key-value collaborator failed.
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// Schema registry could not be built.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl OverrideError {
    pub(crate) fn no_model() -> Self {
        Self::Precondition("no model loaded".to_string())
    }

    /// Whether this error is meant to be rendered inline as a failed result
    /// rather than surfaced as an operational failure.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Precondition(_))
    }
}
