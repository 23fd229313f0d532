//! Domain types and validators for nodeup's own configuration.
//!
//! Pure functions only: no I/O, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "assets.paths",
    "keystore.path",
    "metadata.endpoint",
    "metadata.timeout_secs",
];

pub const DEFAULT_CONFIG_PATH: &str = "/etc/nodeup/config.yaml";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/nodeup/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NodeupConfig {
    pub assets: AssetsConfig,
    pub keystore: KeystoreConfig,
    pub metadata: MetadataConfig,
}

/// Where downloaded assets are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directories searched in order.
    pub paths: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            paths: vec!["/var/cache/nodeup".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystoreConfig {
    /// Directory holding `<id>.crt` / `<id>.key` PEM files.
    pub path: String,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            path: "/srv/kubernetes/pki".to_string(),
        }
    }
}

/// Instance metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://169.254.169.254/latest/meta-data".to_string(),
            timeout_secs: 5,
        }
    }
}

impl NodeupConfig {
    /// Current value of `key`, rendered for display.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside `VALID_CONFIG_KEYS`.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        validate_config_key(key)?;
        Ok(match key {
            "assets.paths" => self.assets.paths.join(","),
            "keystore.path" => self.keystore.path.clone(),
            "metadata.endpoint" => self.metadata.endpoint.clone(),
            _ => self.metadata.timeout_secs.to_string(),
        })
    }

    /// Check every setting.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_asset_paths(&self.assets.paths)?;
        for key in VALID_CONFIG_KEYS.iter().filter(|k| **k != "assets.paths") {
            let value = self.get(key)?;
            validate_config_value(key, &value)?;
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<(), ConfigError> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        });
    }
    Ok(())
}

/// Asset directories must be a non-empty list of absolute paths. Each entry
/// is checked as-is, so a directory name may contain commas.
fn validate_asset_paths(paths: &[String]) -> Result<(), ConfigError> {
    if paths.is_empty() || paths.iter().any(|p| !p.starts_with('/')) {
        return Err(ConfigError::InvalidValue {
            key: "assets.paths".to_string(),
            value: paths.join(","),
            reason: "Asset paths must be a non-empty list of absolute directories.".to_string(),
        });
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    match key {
        "assets.paths" => {
            let paths: Vec<String> = if value.is_empty() {
                Vec::new()
            } else {
                value.split(',').map(String::from).collect()
            };
            validate_asset_paths(&paths)?;
        }
        "keystore.path" => {
            if !value.starts_with('/') {
                return Err(invalid("The keystore path must be absolute."));
            }
        }
        "metadata.endpoint" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid("The metadata endpoint must be an http(s) URL."));
            }
        }
        "metadata.timeout_secs" => {
            if !value.parse::<u64>().is_ok_and(|secs| secs > 0) {
                return Err(invalid("The timeout must be a positive number of seconds."));
            }
        }
        _ => validate_config_key(key)?,
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
