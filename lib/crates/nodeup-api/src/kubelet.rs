// lib/crates/nodeup-api/src/kubelet.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kubelet settings as written in a cluster or instance group document.
///
/// Every field is optional: a layer only states what it wants to change.
/// Unset fields are skipped on serialization so that layering documents by
/// JSON merge never clobbers a value with "nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubeletConfigSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_servers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ca_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_cert_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_private_key_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_kubeconfig: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_manifest_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_infra_container_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seccomp_profile_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_privileged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_debugging_handlers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_node: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_plugin_name: Option<String>,
    #[serde(rename = "networkPluginMTU", skip_serializing_if = "Option::is_none")]
    pub network_plugin_mtu: Option<i32>,
    #[serde(rename = "imageGCHighThresholdPercent", skip_serializing_if = "Option::is_none")]
    pub image_gc_high_threshold_percent: Option<i32>,
    #[serde(rename = "imageGCLowThresholdPercent", skip_serializing_if = "Option::is_none")]
    pub image_gc_low_threshold_percent: Option<i32>,
    #[serde(rename = "clusterDNS", skip_serializing_if = "Option::is_none")]
    pub cluster_dns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgroup_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configure_cbr0: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hairpin_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub babysit_daemons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pods: Option<i32>,
    #[serde(rename = "podCIDR", skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolv_conf: Option<String>,
    #[serde(rename = "reconcileCIDR", skip_serializing_if = "Option::is_none")]
    pub reconcile_cidr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_schedulable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialize_image_pulls: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub node_labels: BTreeMap<String, String>,
    #[serde(rename = "nonMasqueradeCIDR", skip_serializing_if = "Option::is_none")]
    pub non_masquerade_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eviction_hard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_plugin_directory: Option<String>,
    /// `key=value:effect` entries, registered with the API server on start.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub feature_gates: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub kube_reserved: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub system_reserved: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_node_allocatable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_swap_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubelet_cgroups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_cgroups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_cgroups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgroup_driver: Option<String>,
}
