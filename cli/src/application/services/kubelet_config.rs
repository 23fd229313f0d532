//! Application service: resolve the kubelet's effective configuration.
//!
//! Layers, lowest first: the cluster's kubelet document for the node's role,
//! the secure-kubelet CA file, the instance group's kubelet document, role
//! labels, instance-group labels, then taints.

use nodeup_api::{ClusterSpec, InstanceGroupSpec, KubeletConfigSpec, Role};

use crate::domain::distro::Distribution;
use crate::domain::error::ConfigError;
use crate::domain::labels::{MASTER_TAINT, role_labels, validate_taint};
use crate::domain::merge::json_merge_struct;
use crate::domain::version::{KubernetesVersion, REGISTER_WITH_TAINTS};

/// Resolve the kubelet configuration for a node of `role` in `instance_group`.
///
/// # Errors
///
/// Returns `ConfigError::MissingInstanceGroup` when no instance group is
/// given, `ConfigError::InvalidVersion` when the cluster version does not
/// parse, and `ConfigError::InvalidTaint` for a malformed group taint.
pub fn resolve_kubelet_config(
    cluster: &ClusterSpec,
    instance_group: Option<&InstanceGroupSpec>,
    role: Role,
    distro: Distribution,
) -> Result<KubeletConfigSpec, ConfigError> {
    let instance_group = instance_group.ok_or(ConfigError::MissingInstanceGroup)?;
    let version = KubernetesVersion::parse(&cluster.kubernetes_version)?;

    let mut config = KubeletConfigSpec::default();
    let base = role_base_layer(cluster, role);
    if let Some(base) = base {
        tracing::debug!(%role, "merging cluster kubelet layer");
        json_merge_struct(&mut config, base)?;
    }

    if uses_secure_kubelet(cluster, instance_group, role) {
        config.client_ca_file = Some(format!("{}/ca.crt", distro.credential_dir()));
    }

    if let Some(overrides) = &instance_group.kubelet {
        tracing::debug!("merging instance group kubelet layer");
        json_merge_struct(&mut config, overrides)?;
    }

    for (key, value) in role_labels(role) {
        config.node_labels.insert(key.to_string(), value.to_string());
    }
    for (key, value) in &instance_group.node_labels {
        config.node_labels.insert(key.clone(), value.clone());
    }

    if version.is_at_least(REGISTER_WITH_TAINTS) {
        for taint in &instance_group.taints {
            validate_taint(taint)?;
            config.taints.push(taint.clone());
        }
        if config.taints.is_empty() && role.is_master() {
            config.taints.push(MASTER_TAINT.to_string());
        }
        config.register_schedulable = Some(true);
    } else {
        tracing::debug!(%version, "taints left to protokube");
    }

    tracing::trace!(?config, "resolved kubelet config");
    Ok(config)
}

fn role_base_layer(cluster: &ClusterSpec, role: Role) -> Option<&KubeletConfigSpec> {
    match role {
        Role::Master => cluster.master_kubelet.as_ref(),
        Role::Node => cluster.kubelet.as_ref(),
    }
}

/// Anonymous access disabled in any layer that applies to this node.
fn uses_secure_kubelet(cluster: &ClusterSpec, instance_group: &InstanceGroupSpec, role: Role) -> bool {
    let disabled = |layer: Option<&KubeletConfigSpec>| {
        layer.is_some_and(|k| k.anonymous_auth == Some(false))
    };
    disabled(cluster.kubelet.as_ref())
        || (role.is_master() && disabled(cluster.master_kubelet.as_ref()))
        || disabled(instance_group.kubelet.as_ref())
}
