//! Host distribution detection.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::distro::Distribution;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Identify the running host's distribution from `os_release`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or names an unsupported
/// distribution.
pub fn detect_distribution(os_release: &Path) -> Result<Distribution> {
    let content = std::fs::read_to_string(os_release)
        .with_context(|| format!("cannot read {}", os_release.display()))?;
    let distro = Distribution::from_os_release(&content).with_context(|| {
        format!(
            "unsupported distribution in {}.\n\nPass --distro to choose one.",
            os_release.display()
        )
    })?;
    tracing::debug!(%distro, "detected distribution");
    Ok(distro)
}
