//! systemd unit generation: pure functions, no I/O.
//!
//! The caller is responsible for handing the rendered text to a service task.

#![allow(clippy::format_push_string)]

use crate::domain::distro::Distribution;

/// Path of the kubelet environment file (`DAEMON_ARGS`).
pub const KUBELET_ENV_FILE: &str = "/etc/sysconfig/kubelet";

/// Name of the kubelet unit.
pub const KUBELET_SERVICE: &str = "kubelet.service";

/// An ordered `[Section]` / `Key=Value` unit description.
///
/// Sections render in the order they were first set, keys in the order
/// they were set within their section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnitManifest {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl UnitManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` to `section`.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> &mut Self {
        let entry = (key.to_string(), value.to_string());
        if let Some((_, entries)) = self.sections.iter_mut().find(|(name, _)| name == section) {
            entries.push(entry);
        } else {
            self.sections.push((section.to_string(), vec![entry]));
        }
        self
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (section, entries)) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("[{section}]\n"));
            for (key, value) in entries {
                out.push_str(&format!("{key}={value}\n"));
            }
        }
        out
    }
}

/// Generate the kubelet unit for `distro`.
///
/// Returns the unit file string; it does not write to disk.
#[must_use]
pub fn kubelet_unit(distro: Distribution) -> String {
    let mut manifest = UnitManifest::new();
    manifest
        .set("Unit", "Description", "Kubernetes Kubelet Server")
        .set("Unit", "Documentation", "https://github.com/kubernetes/kubernetes")
        .set("Unit", "After", "docker.service");

    if let Some(path) = distro.unit_path_env() {
        // our static utilities live outside the default PATH here
        manifest.set("Service", "Environment", path);
    }

    manifest
        .set("Service", "EnvironmentFile", KUBELET_ENV_FILE)
        .set(
            "Service",
            "ExecStart",
            &format!("{} \"$DAEMON_ARGS\"", distro.kubelet_path()),
        )
        .set("Service", "Restart", "always")
        .set("Service", "RestartSec", "2s")
        .set("Service", "StartLimitInterval", "0")
        .set("Service", "KillMode", "process")
        .set("Service", "User", "root");

    manifest.render()
}
