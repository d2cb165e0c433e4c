//! Key layout used with the key-value persistence collaborator.

/// Key holding the model key of the most recently opened model.
pub const LAST_ACTIVE_MODEL_KEY: &str = "last_active_model";

/// Prefix for per-model override documents.
pub const DOCUMENT_KEY_PREFIX: &str = "overrides/";

/// Store key for the override document of `model_key`.
#[must_use]
pub fn document_key(model_key: &str) -> String {
    format!("{DOCUMENT_KEY_PREFIX}{model_key}")
}
