use std::path::Path;

use anyhow::Context;
use veneer_config::VeneerConfig;

/// Load `.env` (project root first, then the usual upward search) and the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<VeneerConfig> {
    load_project_dotenv(project_root)?;
    VeneerConfig::load_for(project_root).context("failed to load veneer configuration")
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(error).context("failed to load dotenv file");
        }
    }
    Ok(())
}
