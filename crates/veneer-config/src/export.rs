//! Import/export envelope configuration.

use serde::{Deserialize, Serialize};
use veneer_core::envelope::EXPORT_VERSION;

fn default_version() -> String {
    EXPORT_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Version tag written into exported envelopes.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
        }
    }
}
