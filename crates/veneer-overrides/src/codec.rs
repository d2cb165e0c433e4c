//! Export envelope encoding and strict import decoding.
//!
//! Import goes through three gates, each producing `OverrideError::Validation`:
//! JSON syntax, the generated envelope schema (every violation collected),
//! and semver major compatibility with the version this build writes.

use chrono::{DateTime, Utc};
use veneer_core::envelope::ExportEnvelope;
use veneer_core::overrides::OverrideDocument;
use veneer_schema::registry::EXPORT_ENVELOPE;
use veneer_schema::{SchemaError, SchemaRegistry};

use crate::error::OverrideError;

/// Wrap a copy of `document` for export.
#[must_use]
pub fn export_settings(
    document: &OverrideDocument,
    version: &str,
    now: DateTime<Utc>,
) -> ExportEnvelope {
    ExportEnvelope::wrap(version, document.clone(), now)
}

/// Parse and validate an exported envelope.
///
/// # Errors
///
/// Returns `OverrideError::Validation` for malformed JSON, schema violations
/// (all of them, `"; "`-joined) and unsupported major versions.
pub fn parse_envelope(
    text: &str,
    registry: &SchemaRegistry,
    supported_version: &str,
) -> Result<ExportEnvelope, OverrideError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| OverrideError::Validation(format!("invalid JSON: {e}")))?;

    match registry.validate(EXPORT_ENVELOPE, &value) {
        Ok(()) => {}
        Err(SchemaError::ValidationFailed { errors }) => {
            return Err(OverrideError::Validation(errors.join("; ")));
        }
        Err(other) => return Err(other.into()),
    }

    let envelope: ExportEnvelope = serde_json::from_value(value)
        .map_err(|e| OverrideError::Validation(format!("(root): {e}")))?;

    check_version(&envelope.version, supported_version)?;
    Ok(envelope)
}

/// Accept any version sharing the supported major.
fn check_version(version: &str, supported: &str) -> Result<(), OverrideError> {
    let incoming = semver::Version::parse(version)
        .map_err(|e| OverrideError::Validation(format!("version: {e}")))?;
    let supported = semver::Version::parse(supported)
        .map_err(|e| OverrideError::Validation(format!("version: unsupported format ({e})")))?;
    if incoming.major != supported.major {
        return Err(OverrideError::Validation(format!(
            "version: unsupported major version {} (expected {})",
            incoming.major, supported.major
        )));
    }
    Ok(())
}

/// Turn an accepted envelope into the document for `current_model_key`.
///
/// The envelope's own model key is discarded; cross-model import is allowed.
#[must_use]
pub fn into_document(
    envelope: ExportEnvelope,
    current_model_key: &str,
    now: DateTime<Utc>,
) -> OverrideDocument {
    let mut document = envelope.document;
    document.model_key = current_model_key.to_string();
    document.updated_at = now;
    document.prune();
    document
}
