//! Host image families and the per-distro layout decisions that follow
//! from them.
//!
//! Every decision is an exhaustive `match`, so adding a distro fails to
//! compile until each one is made.

use serde::{Deserialize, Serialize};

/// Operating-system image family of the host being bootstrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    Debian,
    Ubuntu,
    #[value(name = "centos")]
    #[serde(rename = "centos")]
    CentOs,
    Rhel,
    #[value(name = "coreos")]
    #[serde(rename = "coreos")]
    CoreOs,
    /// Google Container-Optimized OS; its root filesystem is mounted `noexec`.
    #[value(name = "container-os")]
    ContainerOs,
}

impl Distribution {
    /// Identify the distro from the contents of `/etc/os-release`.
    #[must_use]
    pub fn from_os_release(content: &str) -> Option<Self> {
        let id = content.lines().find_map(|line| {
            line.trim()
                .strip_prefix("ID=")
                .map(|v| v.trim_matches('"').to_ascii_lowercase())
        })?;
        match id.as_str() {
            "debian" => Some(Self::Debian),
            "ubuntu" => Some(Self::Ubuntu),
            "centos" => Some(Self::CentOs),
            "rhel" => Some(Self::Rhel),
            "coreos" => Some(Self::CoreOs),
            "cos" => Some(Self::ContainerOs),
            _ => None,
        }
    }

    /// Where the kubelet binary is installed.
    #[must_use]
    pub fn kubelet_path(self) -> &'static str {
        match self {
            Self::CoreOs => "/opt/kubernetes/bin/kubelet",
            Self::ContainerOs => "/home/kubernetes/bin/kubelet",
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel => "/usr/local/bin/kubelet",
        }
    }

    /// Directory holding the node's cluster credentials.
    #[must_use]
    pub fn credential_dir(self) -> &'static str {
        match self {
            // /srv is read-only on COS
            Self::ContainerOs => "/etc/srv/kubernetes",
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel | Self::CoreOs => {
                "/srv/kubernetes"
            }
        }
    }

    /// Directory CNI plugin binaries are installed into.
    #[must_use]
    pub fn cni_bin_dir(self) -> &'static str {
        match self {
            Self::ContainerOs => "/home/kubernetes/bin/",
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel | Self::CoreOs => {
                "/opt/cni/bin/"
            }
        }
    }

    /// Statically linked utilities the image does not ship, as
    /// `(asset name, install path)`.
    #[must_use]
    pub fn static_utils(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::CoreOs => &[("socat", "/opt/kubernetes/bin/socat")],
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel | Self::ContainerOs => &[],
        }
    }

    /// Whether the root filesystem forbids execution, so volume mounts must
    /// run from a containerized mounter.
    #[must_use]
    pub fn uses_containerized_mounter(self) -> bool {
        match self {
            Self::ContainerOs => true,
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel | Self::CoreOs => false,
        }
    }

    /// Extra `PATH` for the kubelet unit, when the image keeps our utilities
    /// outside the default search path.
    #[must_use]
    pub fn unit_path_env(self) -> Option<&'static str> {
        match self {
            Self::CoreOs => Some(
                "PATH=/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin:/opt/kubernetes/bin",
            ),
            Self::Debian | Self::Ubuntu | Self::CentOs | Self::Rhel | Self::ContainerOs => None,
        }
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Debian => "debian",
            Self::Ubuntu => "ubuntu",
            Self::CentOs => "centos",
            Self::Rhel => "rhel",
            Self::CoreOs => "coreos",
            Self::ContainerOs => "container-os",
        };
        f.write_str(name)
    }
}
