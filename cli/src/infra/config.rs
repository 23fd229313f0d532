//! Infrastructure implementation of the `ConfigStore` port, plus loaders for
//! the cluster and instance group documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nodeup_api::{Cluster, InstanceGroup};
use serde::de::DeserializeOwned;

use crate::application::ports::ConfigStore;
use crate::domain::config::{DEFAULT_CONFIG_PATH, NodeupConfig};
use crate::domain::error::ConfigError;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    /// Set by `--config`; wins over `NODEUP_CONFIG`.
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<NodeupConfig> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(NodeupConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> PathBuf {
        if let Some(path) = &self.explicit {
            return path.clone();
        }
        if let Ok(val) = std::env::var("NODEUP_CONFIG") {
            return PathBuf::from(val);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }
}

/// Load a `Cluster` document.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not a cluster document.
pub fn load_cluster(path: &Path) -> Result<Cluster> {
    load_document("cluster", path)
}

/// Load an `InstanceGroup` document.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not an instance group document.
pub fn load_instance_group(path: &Path) -> Result<InstanceGroup> {
    load_document("instance group", path)
}

fn load_document<T: DeserializeOwned>(kind: &'static str, path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).map_err(|e| {
        ConfigError::Load {
            kind,
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
