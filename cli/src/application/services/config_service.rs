//! Application service: configuration use-cases.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::NodeupConfig;

/// Load and validate configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a setting is invalid.
pub fn load_config(store: &impl ConfigStore) -> Result<NodeupConfig> {
    let config = store.load()?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", store.path().display()))?;
    Ok(config)
}

/// Value of a single setting.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the key is unknown.
pub fn get_value(store: &impl ConfigStore, key: &str) -> Result<String> {
    Ok(load_config(store)?.get(key)?)
}
