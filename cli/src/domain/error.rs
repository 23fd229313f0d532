//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Missing or malformed input while resolving the kubelet configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("InstanceGroup was not set")]
    MissingInstanceGroup,

    #[error("invalid Kubernetes version {version:?}: {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid taint {taint:?}: expected <key>=<value>:<NoSchedule|PreferNoSchedule|NoExecute>")]
    InvalidTaint { taint: String },

    #[error("error merging kubelet config: {0}")]
    Merge(#[from] serde_json::Error),

    #[error("error rendering kubeconfig: {0}")]
    Kubeconfig(#[from] serde_yaml::Error),

    #[error("cannot load {kind} from {path}: {reason}")]
    Load {
        kind: &'static str,
        path: String,
        reason: String,
    },

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── Collaborator errors ───────────────────────────────────────────────────────

/// A named asset could not be resolved by the asset store.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unable to locate asset {name:?}")]
    NotFound { name: String },

    #[error("error trying to locate asset {name:?}: {reason}")]
    Lookup { name: String, reason: String },
}

/// The instance metadata service could not answer.
#[derive(Debug, Error)]
#[error("error fetching {key} from the instance metadata service: {reason}")]
pub struct NetworkLookupError {
    pub key: String,
    pub reason: String,
}

// ── Build errors ──────────────────────────────────────────────────────────────

/// Stage of the kubelet build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Config,
    EnvironmentFile,
    Binary,
    Kubeconfig,
    StaticUtils,
    ContainerizedMounter,
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Config => "error building kubelet config",
            Self::EnvironmentFile => "error building kubelet environment file",
            Self::Binary => "error installing kubelet binary",
            Self::Kubeconfig => "error building kubelet kubeconfig",
            Self::StaticUtils => "error installing static utilities",
            Self::ContainerizedMounter => "error installing containerized mounter",
        };
        f.write_str(name)
    }
}

/// Root cause of a failed build stage.
#[derive(Debug, Error)]
pub enum BuildCause {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    NetworkLookup(#[from] NetworkLookupError),

    #[error("error reading {id:?} from keystore: {reason}")]
    Keystore { id: String, reason: String },
}

/// A kubelet build failed; carries the stage and its cause.
///
/// The cause is part of the message rather than the source chain, so
/// `{:#}` does not print it twice.
#[derive(Debug, Error)]
#[error("{stage}: {cause}")]
pub struct BuildError {
    pub stage: BuildStage,
    pub cause: BuildCause,
}

impl BuildError {
    pub fn new(stage: BuildStage, cause: impl Into<BuildCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}
