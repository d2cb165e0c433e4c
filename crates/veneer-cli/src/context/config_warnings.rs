use veneer_config::{ExportConfig, StoreConfig, TraversalConfig, VeneerConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &VeneerConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VeneerConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let sections = [
        ("STORE", config.store == StoreConfig::default(), "VENEER_STORE__BACKEND"),
        (
            "TRAVERSAL",
            config.traversal == TraversalConfig::default(),
            "VENEER_TRAVERSAL__MAX_DEPTH",
        ),
        ("EXPORT", config.export == ExportConfig::default(), "VENEER_EXPORT__VERSION"),
    ];

    sections
        .into_iter()
        .filter(|(section, is_default, _)| {
            *is_default && has_single_underscore_key(&env_keys, section)
        })
        .map(|(section, _, example)| {
            format!(
                "{} config appears default while VENEER_{section}_* env vars exist. Use double underscores (example: {example}).",
                section.to_lowercase()
            )
        })
        .collect()
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let prefix = format!("VENEER_{section}_");
    keys.iter()
        .any(|key| key.starts_with(&prefix) && !key[prefix.len()..].starts_with('_'))
}
