use std::path::Path;

use anyhow::Context;
use veneer_config::VeneerConfig;
use veneer_core::scene::SceneNode;
use veneer_overrides::OverrideService;
use veneer_store::ConfiguredStore;

use crate::cli::root_commands::ModelArgs;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: OverrideService<ConfiguredStore>,
}

impl AppContext {
    /// Build the configured store and the override service for `project_root`.
    pub fn init(project_root: &Path, config: &VeneerConfig) -> anyhow::Result<Self> {
        let store = ConfiguredStore::from_config(&config.store, project_root)
            .context("failed to open override store")?;
        let service = OverrideService::new(
            store,
            config.traversal.options(),
            config.export.version.clone(),
        )
        .context("failed to initialize override service")?;

        Ok(Self { service })
    }

    /// Load the scene named by `args` and open its model.
    ///
    /// The model key is `--model`, else the last active model, else the
    /// scene file stem. Returns the model key.
    pub async fn open_model(&mut self, args: &ModelArgs) -> anyhow::Result<String> {
        let root = self.read_scene(&args.scene).await?;
        let model_key = match &args.model {
            Some(key) => key.clone(),
            None => match self.service.last_active_model().await? {
                Some(key) => key,
                None => scene_stem(&args.scene)?,
            },
        };

        self.service
            .init_for_model(&model_key, root)
            .await
            .with_context(|| format!("failed to open model '{model_key}'"))?;
        Ok(model_key)
    }

    /// Read and schema-check a scene snapshot.
    async fn read_scene(&self, path: &Path) -> anyhow::Result<SceneNode> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("scene file {} is not valid JSON", path.display()))?;
        self.service
            .registry()
            .validate("scene_node", &value)
            .with_context(|| format!("scene file {} is not a scene tree", path.display()))?;
        Ok(serde_json::from_value(value)?)
    }
}

fn scene_stem(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a model key from {}; pass --model", path.display()))
}
