//! Unit tests for kubelet configuration resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use nodeup_api::{KubeletConfigSpec, Role};
use nodeup_cli::application::services::kubelet_config::resolve_kubelet_config;
use nodeup_cli::domain::distro::Distribution;
use nodeup_cli::domain::error::ConfigError;

use crate::mocks::{cluster, instance_group};

const MASTER_TAINT: &str = "node-role.kubernetes.io/master=:NoSchedule";

fn role_keys(config: &KubeletConfigSpec) -> Vec<&str> {
    config
        .node_labels
        .keys()
        .map(String::as_str)
        .filter(|k| k.starts_with("node-role.kubernetes.io/") || *k == "kubernetes.io/role")
        .collect()
}

#[test]
fn test_master_gets_default_taint_and_schedulable() {
    let config = resolve_kubelet_config(
        &cluster("1.6.0"),
        Some(&instance_group(Role::Master)),
        Role::Master,
        Distribution::Ubuntu,
    )
    .expect("resolve");

    assert_eq!(config.taints, vec![MASTER_TAINT.to_string()]);
    assert_eq!(config.register_schedulable, Some(true));
}

#[test]
fn test_node_gets_no_default_taint() {
    let config = resolve_kubelet_config(
        &cluster("1.9.0"),
        Some(&instance_group(Role::Node)),
        Role::Node,
        Distribution::Ubuntu,
    )
    .expect("resolve");

    assert!(config.taints.is_empty());
    assert_eq!(config.register_schedulable, Some(true));
}

#[test]
fn test_master_explicit_taints_replace_default() {
    let mut ig = instance_group(Role::Master);
    ig.taints = vec!["dedicated=control:NoExecute".into()];
    let config =
        resolve_kubelet_config(&cluster("1.8.0"), Some(&ig), Role::Master, Distribution::Ubuntu)
            .expect("resolve");

    assert_eq!(config.taints, vec!["dedicated=control:NoExecute".to_string()]);
}

#[test]
fn test_inherited_master_taints_suppress_default() {
    let mut c = cluster("1.8.0");
    c.master_kubelet = Some(KubeletConfigSpec {
        taints: vec!["a=b:PreferNoSchedule".into()],
        ..KubeletConfigSpec::default()
    });
    let config = resolve_kubelet_config(
        &c,
        Some(&instance_group(Role::Master)),
        Role::Master,
        Distribution::Ubuntu,
    )
    .expect("resolve");

    assert_eq!(config.taints, vec!["a=b:PreferNoSchedule".to_string()]);
}

#[test]
fn test_below_threshold_ignores_group_taints() {
    let mut ig = instance_group(Role::Master);
    ig.taints = vec!["dedicated=gpu:NoSchedule".into()];
    let config =
        resolve_kubelet_config(&cluster("1.5.3"), Some(&ig), Role::Master, Distribution::Ubuntu)
            .expect("resolve");

    assert!(config.taints.is_empty());
    assert_eq!(config.register_schedulable, None);
}

#[test]
fn test_role_labels_for_each_role() {
    for (role, key, legacy) in [
        (Role::Master, "node-role.kubernetes.io/master", "master"),
        (Role::Node, "node-role.kubernetes.io/node", "node"),
    ] {
        let config = resolve_kubelet_config(
            &cluster("1.9.0"),
            Some(&instance_group(role)),
            role,
            Distribution::Debian,
        )
        .expect("resolve");

        assert_eq!(role_keys(&config), vec!["kubernetes.io/role", key]);
        assert_eq!(config.node_labels[key], "");
        assert_eq!(config.node_labels["kubernetes.io/role"], legacy);
    }
}

#[test]
fn test_group_labels_merge_with_cluster_labels() {
    let mut c = cluster("1.9.0");
    let mut cluster_kubelet = KubeletConfigSpec::default();
    cluster_kubelet
        .node_labels
        .insert("team".into(), "platform".into());
    c.kubelet = Some(cluster_kubelet);
    let mut ig = instance_group(Role::Node);
    ig.node_labels.insert("spot".into(), "true".into());

    let config = resolve_kubelet_config(&c, Some(&ig), Role::Node, Distribution::Debian)
        .expect("resolve");

    assert_eq!(config.node_labels["team"], "platform");
    assert_eq!(config.node_labels["spot"], "true");
}

#[test]
fn test_secure_kubelet_from_master_layer_only_applies_to_masters() {
    let mut c = cluster("1.9.0");
    c.master_kubelet = Some(KubeletConfigSpec {
        anonymous_auth: Some(false),
        ..KubeletConfigSpec::default()
    });

    let master = resolve_kubelet_config(
        &c,
        Some(&instance_group(Role::Master)),
        Role::Master,
        Distribution::Debian,
    )
    .expect("resolve");
    let node = resolve_kubelet_config(
        &c,
        Some(&instance_group(Role::Node)),
        Role::Node,
        Distribution::Debian,
    )
    .expect("resolve");

    assert_eq!(master.client_ca_file.as_deref(), Some("/srv/kubernetes/ca.crt"));
    assert_eq!(node.client_ca_file, None);
}

#[test]
fn test_secure_kubelet_from_group_layer() {
    let mut ig = instance_group(Role::Node);
    ig.kubelet = Some(KubeletConfigSpec {
        anonymous_auth: Some(false),
        ..KubeletConfigSpec::default()
    });
    let config =
        resolve_kubelet_config(&cluster("1.9.0"), Some(&ig), Role::Node, Distribution::CoreOs)
            .expect("resolve");

    assert_eq!(config.client_ca_file.as_deref(), Some("/srv/kubernetes/ca.crt"));
    assert_eq!(config.anonymous_auth, Some(false));
}

#[test]
fn test_invalid_version_is_config_error() {
    let err = resolve_kubelet_config(
        &cluster("not-a-version"),
        Some(&instance_group(Role::Node)),
        Role::Node,
        Distribution::Debian,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidVersion { .. }), "got: {err}");
}

#[test]
fn test_missing_instance_group_message() {
    let err = resolve_kubelet_config(&cluster("1.9.0"), None, Role::Node, Distribution::Debian)
        .unwrap_err();
    assert_eq!(err.to_string(), "InstanceGroup was not set");
}

#[test]
fn test_resolution_is_repeatable() {
    let mut ig = instance_group(Role::Master);
    ig.node_labels.insert("zone".into(), "a".into());
    let first =
        resolve_kubelet_config(&cluster("1.9.0"), Some(&ig), Role::Master, Distribution::Rhel)
            .expect("resolve");
    let second =
        resolve_kubelet_config(&cluster("1.9.0"), Some(&ig), Role::Master, Distribution::Rhel)
            .expect("resolve");
    assert_eq!(first, second);
}
