//! Portable, versioned wrapper around an `OverrideDocument`.
//!
//! This is the only durable wire format Veneer defines. Every object in it is
//! closed (`deny_unknown_fields`) so the generated JSON Schema rejects unknown
//! fields at any level.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::overrides::OverrideDocument;

/// Envelope version written by this build.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Exported override document with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportEnvelope {
    /// Semantic version of the envelope format, `MAJOR.MINOR.PATCH`.
    #[schemars(extend("pattern" = r"^\d+\.\d+\.\d+$"))]
    pub version: String,
    #[schemars(extend("minLength" = 1))]
    pub model_key: String,
    pub exported_at: DateTime<Utc>,
    pub document: OverrideDocument,
}

impl ExportEnvelope {
    /// Wrap `document` with the given version tag and export time.
    #[must_use]
    pub fn wrap(version: impl Into<String>, document: OverrideDocument, now: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            model_key: document.model_key.clone(),
            exported_at: now,
            document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_copies_model_key() {
        let now = Utc::now();
        let env = ExportEnvelope::wrap(EXPORT_VERSION, OverrideDocument::new("tower", now), now);
        assert_eq!(env.model_key, "tower");
        assert_eq!(env.version, "1.0.0");
        assert_eq!(env.exported_at, now);
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        let text = r#"{
            "version": "1.0.0",
            "modelKey": "m",
            "exportedAt": "2026-01-01T00:00:00Z",
            "document": {
                "modelKey": "m",
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z",
                "overrides": {}
            },
            "extra": 1
        }"#;
        assert!(serde_json::from_str::<ExportEnvelope>(text).is_err());
    }
}
