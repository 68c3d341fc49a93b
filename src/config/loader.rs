use anyhow::{Context, Result};
use std::path::Path;

use super::Config;

pub const CONFIG_FILE_NAME: &str = "buildstamp.toml";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Find and load configuration file
/// Searches in current directory and parent directories for buildstamp.toml
pub fn find_and_load_config() -> Result<Option<Config>> {
    let config_names = [CONFIG_FILE_NAME, ".buildstamp.toml"];

    let mut current_dir = std::env::current_dir()?;

    loop {
        for name in &config_names {
            let config_path = current_dir.join(name);
            if config_path.exists() {
                let config = load_config(&config_path)?;
                return Ok(Some(config));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Explicit path if given, otherwise discovered config, otherwise defaults
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => Ok(find_and_load_config()?.unwrap_or_default()),
    }
}
