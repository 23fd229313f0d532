//! Kubernetes version parsing and feature gates keyed on minor releases.
//!
//! Pure functions only: no I/O.

use crate::domain::error::ConfigError;

/// A `major.minor` release boundary at which kubelet behavior changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinorRelease {
    pub major: u64,
    pub minor: u64,
}

impl MinorRelease {
    #[must_use]
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for MinorRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// `--register-with-taints` and `--register-schedulable` are honored from here on.
pub const REGISTER_WITH_TAINTS: MinorRelease = MinorRelease::new(1, 6);

/// `--network-plugin-dir` was renamed to `--cni-bin-dir`.
pub const CNI_BIN_DIR_FLAG: MinorRelease = MinorRelease::new(1, 9);

/// The mounter asset lost its `gci-` prefix.
pub const MOUNTER_ASSET_RENAME: MinorRelease = MinorRelease::new(1, 9);

/// Kubernetes version of the cluster a node joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubernetesVersion(semver::Version);

impl KubernetesVersion {
    /// Parse `1.9.3`, `v1.9.3`, `1.9.0-alpha.1` or the short form `1.9`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVersion` when the string is not a
    /// semantic version.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_start_matches('v');
        let padded = if trimmed.matches('.').count() == 1 && !trimmed.contains('-') {
            format!("{trimmed}.0")
        } else {
            trimmed.to_string()
        };
        semver::Version::parse(&padded)
            .map(Self)
            .map_err(|e| ConfigError::InvalidVersion {
                version: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Whether this version is at or above `release`.
    ///
    /// Compares major and minor only, so pre-releases of a minor count as
    /// that minor.
    #[must_use]
    pub fn is_at_least(&self, release: MinorRelease) -> bool {
        (self.0.major, self.0.minor) >= (release.major, release.minor)
    }
}

impl std::fmt::Display for KubernetesVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
