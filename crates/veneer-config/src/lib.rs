//! # veneer-config
//!
//! Layered configuration loading for Veneer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VENEER_*` prefix, `__` as separator)
//! 2. Project-level `.veneer/config.toml`
//! 3. User-level `~/.config/veneer/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VENEER_STORE__DATA_DIR` -> `store.data_dir`,
//! `VENEER_TRAVERSAL__MAX_DEPTH` -> `traversal.max_depth`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use veneer_config::VeneerConfig;
//!
//! let config = VeneerConfig::load_with_dotenv().expect("config");
//! println!("max depth: {}", config.traversal.max_depth);
//! ```

mod error;
mod export;
mod store;
mod traversal;

pub use error::ConfigError;
pub use export::ExportConfig;
pub use store::{StoreBackend, StoreConfig};
pub use traversal::TraversalConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project-local Veneer state and config.
pub const PROJECT_DIR: &str = ".veneer";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VeneerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl VeneerConfig {
    /// Load configuration from all sources, using the current directory as
    /// the project root.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Path::new("."))
    }

    /// Load configuration for an explicit project root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_for(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain for `project_root`.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VENEER_").split("__"))
    }

    /// Reject values the traversals and the export codec cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traversal.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }

        let version = semver::Version::parse(&self.export.version).map_err(|e| {
            ConfigError::InvalidValue {
                field: "export.version".into(),
                reason: e.to_string(),
            }
        })?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.version".into(),
                reason: "must be plain MAJOR.MINOR.PATCH".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("veneer").join("config.toml"))
    }
}
