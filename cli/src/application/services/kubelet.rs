//! Application service: kubelet installation.
//!
//! Turns a resolved kubelet configuration into the ordered host tasks that
//! install and run the kubelet. Nothing here touches the host; every external
//! answer comes through a port.

use nodeup_api::{ClusterSpec, InstanceGroupSpec, KubeletConfigSpec, NetworkingMode, Role};

use crate::application::ports::{AssetStore, KeyStore, MetadataService};
use crate::application::services::kubelet_config::resolve_kubelet_config;
use crate::application::services::mounter::{containerized_mounter_tasks, find_asset, mounter_path};
use crate::domain::distro::Distribution;
use crate::domain::error::{BuildCause, BuildError, BuildStage, ConfigError};
use crate::domain::flags::build_flags;
use crate::domain::kubeconfig::{
    KUBELET_KUBECONFIG_PATH, PkiCredentials, api_server_url, render_pki_kubeconfig,
};
use crate::domain::systemd::{KUBELET_ENV_FILE, KUBELET_SERVICE, kubelet_unit};
use crate::domain::task::{Contents, MODE_EXECUTABLE, MODE_SECRET, Task, duplicate_keys};
use crate::domain::version::{CNI_BIN_DIR_FLAG, KubernetesVersion};

/// Written by the cloud-config stage when the cluster declares one.
pub const CLOUD_CONFIG_PATH: &str = "/etc/kubernetes/cloud.config";

/// Directory CNI network configurations are read from.
pub const CNI_CONF_DIR: &str = "/etc/cni/net.d/";

/// Keypair the kubelet authenticates with.
const KUBELET_KEYPAIR: &str = "kubelet";
const CA_KEYPAIR: &str = "ca";

/// Everything about the node a build needs besides its kubelet config.
#[derive(Debug, Clone, Copy)]
pub struct BuildEnv<'a> {
    pub cluster: &'a ClusterSpec,
    pub distro: Distribution,
    pub version: &'a KubernetesVersion,
    pub is_master: bool,
}

impl BuildEnv<'_> {
    fn networking(&self) -> Option<NetworkingMode> {
        self.cluster.networking_mode()
    }

    fn uses_cni(&self) -> bool {
        self.networking().is_some_and(NetworkingMode::uses_cni)
    }

    /// Amazon VPC is declared, whichever provider was selected first.
    fn declares_amazon_vpc(&self) -> bool {
        self.cluster
            .networking
            .as_ref()
            .is_some_and(|n| n.amazonvpc.is_some())
    }

    fn declares_kubenet(&self) -> bool {
        self.cluster
            .networking
            .as_ref()
            .is_some_and(|n| n.kubenet.is_some())
    }
}

/// The node being bootstrapped.
#[derive(Debug, Clone, Copy)]
pub struct NodeSpec<'a> {
    pub cluster: &'a ClusterSpec,
    pub instance_group: Option<&'a InstanceGroupSpec>,
    pub role: Role,
    pub distro: Distribution,
}

/// Resolve the node's kubelet configuration and build its tasks.
///
/// # Errors
///
/// Configuration problems surface as a `BuildError` at stage `Config`;
/// everything else as in `build_kubelet_tasks`.
pub fn plan_kubelet(
    node: &NodeSpec<'_>,
    assets: &impl AssetStore,
    keystore: &impl KeyStore,
    metadata: &impl MetadataService,
) -> Result<Vec<Task>, BuildError> {
    let stage = |e: ConfigError| BuildError::new(BuildStage::Config, e);
    let config =
        resolve_kubelet_config(node.cluster, node.instance_group, node.role, node.distro)
            .map_err(stage)?;
    let version = KubernetesVersion::parse(&node.cluster.kubernetes_version).map_err(stage)?;
    let env = BuildEnv {
        cluster: node.cluster,
        distro: node.distro,
        version: &version,
        is_master: node.role.is_master(),
    };
    let tasks = build_kubelet_tasks(&config, &env, assets, keystore, metadata)?;
    debug_assert!(duplicate_keys(&tasks).is_empty(), "duplicate task keys");
    Ok(tasks)
}

/// Build the kubelet's tasks in application order.
///
/// # Errors
///
/// Returns the first failing stage as a `BuildError`; no tasks are returned
/// on failure.
pub fn build_kubelet_tasks(
    config: &KubeletConfigSpec,
    env: &BuildEnv<'_>,
    assets: &impl AssetStore,
    keystore: &impl KeyStore,
    metadata: &impl MetadataService,
) -> Result<Vec<Task>, BuildError> {
    let mut tasks = vec![environment_file(config, env, metadata)?];

    let kubelet = find_asset(assets, "kubelet").map_err(|e| BuildError::new(BuildStage::Binary, e))?;
    tasks.push(Task::file(
        env.distro.kubelet_path(),
        Contents::Asset {
            name: "kubelet".to_string(),
            bytes: kubelet,
        },
        Some(MODE_EXECUTABLE),
    ));

    tasks.push(kubeconfig_file(env, keystore)?);

    if env.uses_cni() {
        tasks.push(Task::directory(CNI_CONF_DIR));
    }

    for (name, path) in env.distro.static_utils() {
        let bytes =
            find_asset(assets, name).map_err(|e| BuildError::new(BuildStage::StaticUtils, e))?;
        tasks.push(Task::file(
            *path,
            Contents::Asset {
                name: (*name).to_string(),
                bytes,
            },
            Some(MODE_EXECUTABLE),
        ));
    }

    if env.distro.uses_containerized_mounter() {
        tasks.extend(containerized_mounter_tasks(env.version, assets)?);
    }

    let definition = kubelet_unit(env.distro);
    tracing::trace!(unit = %definition, "kubelet unit");
    tasks.push(Task::Service {
        name: KUBELET_SERVICE.to_string(),
        definition,
        // protokube starts the kubelet on masters
        running: !env.is_master,
    });

    tracing::debug!(distro = %env.distro, count = tasks.len(), "built kubelet tasks");
    Ok(tasks)
}

/// Kubelet flags, including the ones that depend on the node rather than
/// on the kubelet config.
///
/// # Errors
///
/// Fails only if the instance metadata service cannot report the node's
/// address when Amazon VPC networking needs it.
pub fn kubelet_flags(
    config: &KubeletConfigSpec,
    env: &BuildEnv<'_>,
    metadata: &impl MetadataService,
) -> Result<String, BuildError> {
    let mut flags = vec![build_flags(config)];
    let cni_bin_dir = env.distro.cni_bin_dir();

    if env.cluster.cloud_config.is_some() {
        flags.push(format!("--cloud-config={CLOUD_CONFIG_PATH}"));
    }

    if env.uses_cni() {
        flags.push(format!("--cni-bin-dir={cni_bin_dir}"));
        flags.push(format!("--cni-conf-dir={CNI_CONF_DIR}"));
        if env.declares_amazon_vpc() {
            let address = metadata
                .get_metadata("local-ipv4")
                .map_err(|e| BuildError::new(BuildStage::EnvironmentFile, e))?;
            flags.push(format!("--node-ip={}", address.trim()));
        }
    }

    if env.declares_kubenet() {
        if env.version.is_at_least(CNI_BIN_DIR_FLAG) {
            flags.push(format!("--cni-bin-dir={cni_bin_dir}"));
        } else {
            flags.push(format!("--network-plugin-dir={cni_bin_dir}"));
        }
    }

    if env.distro.uses_containerized_mounter() {
        flags.push(format!("--experimental-mounter-path={}", mounter_path()));
    }

    flags.retain(|f| !f.is_empty());
    Ok(flags.join(" "))
}

fn environment_file(
    config: &KubeletConfigSpec,
    env: &BuildEnv<'_>,
    metadata: &impl MetadataService,
) -> Result<Task, BuildError> {
    let flags = kubelet_flags(config, env, metadata)?;
    // HOME lets the kubelet find /root/.docker/config.json
    let body = format!("DAEMON_ARGS=\"{flags}\"\nHOME=\"/root\"\n");
    Ok(Task::file(KUBELET_ENV_FILE, Contents::Text(body), None))
}

fn kubeconfig_file(env: &BuildEnv<'_>, keystore: &impl KeyStore) -> Result<Task, BuildError> {
    let fail = |id: &str, e: &anyhow::Error| {
        BuildError::new(
            BuildStage::Kubeconfig,
            BuildCause::Keystore {
                id: id.to_string(),
                reason: format!("{e:#}"),
            },
        )
    };
    let ca = keystore.certificate(CA_KEYPAIR).map_err(|e| fail(CA_KEYPAIR, &e))?;
    let cert = keystore
        .certificate(KUBELET_KEYPAIR)
        .map_err(|e| fail(KUBELET_KEYPAIR, &e))?;
    let key = keystore
        .private_key(KUBELET_KEYPAIR)
        .map_err(|e| fail(KUBELET_KEYPAIR, &e))?;

    let server = api_server_url(env.is_master, &env.cluster.master_internal_name);
    let text = render_pki_kubeconfig(
        PkiCredentials {
            ca_certificate: &ca,
            certificate: &cert,
            private_key: &key,
        },
        &server,
        KUBELET_KEYPAIR,
    )
    .map_err(|e| BuildError::new(BuildStage::Kubeconfig, e))?;

    Ok(Task::file(
        KUBELET_KUBECONFIG_PATH,
        Contents::Secret(text),
        Some(MODE_SECRET),
    ))
}
