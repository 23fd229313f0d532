//! Application service: the containerized mounter.
//!
//! On hosts whose root filesystem is `noexec` the kubelet cannot run mount
//! helpers from it. Instead we unpack a small root filesystem under an
//! exec-remounted home and point the kubelet at a mounter that chroots there.
//! The kubelet's data directory is bind-mounted into that root with shared
//! propagation so mounts made inside show up outside.

use crate::application::ports::AssetStore;
use crate::domain::error::{AssetError, BuildError, BuildStage};
use crate::domain::task::{Contents, MODE_EXECUTABLE, Task};
use crate::domain::version::{KubernetesVersion, MOUNTER_ASSET_RENAME};

/// Home of the mounter binary and its root filesystem.
pub const MOUNTER_HOME: &str = "/home/kubernetes/containerized_mounter";

const ROOTFS_ARCHIVE_NAME: &str = "containerized_mounter";
const ROOTFS_ARCHIVE_SOURCE: &str =
    "https://storage.googleapis.com/kubernetes-release/gci-mounter/mounter.tar";
const ROOTFS_ARCHIVE_HASH: &str = "8003b798cf33c7f91320cd6ee5cec4fa22244571";

/// Host paths the mounter needs read-only inside its root.
const READ_ONLY_BINDS: [&str; 3] = ["/proc", "/dev", "/etc/resolv.conf"];

/// Path of the mounter the kubelet is told to use.
#[must_use]
pub fn mounter_path() -> String {
    format!("{MOUNTER_HOME}/mounter")
}

/// Asset name of the mounter binary for `version`.
#[must_use]
pub fn mounter_asset_name(version: &KubernetesVersion) -> &'static str {
    if version.is_at_least(MOUNTER_ASSET_RENAME) {
        "mounter"
    } else {
        "gci-mounter"
    }
}

/// Tasks installing the containerized mounter, in application order.
///
/// # Errors
///
/// Returns a `BuildError` at stage `ContainerizedMounter` when the mounter
/// asset cannot be found.
pub fn containerized_mounter_tasks(
    version: &KubernetesVersion,
    assets: &impl AssetStore,
) -> Result<Vec<Task>, BuildError> {
    let asset = mounter_asset_name(version);
    let bytes = find_asset(assets, asset)
        .map_err(|e| BuildError::new(BuildStage::ContainerizedMounter, e))?;

    let rootfs = format!("{MOUNTER_HOME}/rootfs");
    let kubelet_dir_in_rootfs = format!("{rootfs}/var/lib/kubelet");

    let mut tasks = vec![
        Task::file(
            mounter_path(),
            Contents::Asset {
                name: asset.to_string(),
                bytes,
            },
            Some(MODE_EXECUTABLE),
        ),
        Task::directory(MOUNTER_HOME),
        Task::Archive {
            name: ROOTFS_ARCHIVE_NAME.to_string(),
            source: ROOTFS_ARCHIVE_SOURCE.to_string(),
            hash: ROOTFS_ARCHIVE_HASH.to_string(),
            target_dir: rootfs.clone(),
        },
        Task::directory(kubelet_dir_in_rootfs.clone()),
        Task::bind_mount(MOUNTER_HOME, MOUNTER_HOME, &["exec"], false),
        Task::bind_mount("/var/lib/kubelet/", kubelet_dir_in_rootfs, &["rshared"], true),
    ];
    tasks.extend(
        READ_ONLY_BINDS
            .iter()
            .map(|host| Task::bind_mount(*host, format!("{rootfs}{host}"), &["ro"], false)),
    );

    tracing::debug!(asset, count = tasks.len(), "containerized mounter tasks");
    Ok(tasks)
}

/// Look up a required asset, turning absence into `AssetError::NotFound`.
pub(crate) fn find_asset(assets: &impl AssetStore, name: &str) -> Result<Vec<u8>, AssetError> {
    match assets.find(name, None) {
        Ok(Some(bytes)) => Ok(bytes),
        Ok(None) => Err(AssetError::NotFound {
            name: name.to_string(),
        }),
        Err(e) => Err(AssetError::Lookup {
            name: name.to_string(),
            reason: format!("{e:#}"),
        }),
    }
}
