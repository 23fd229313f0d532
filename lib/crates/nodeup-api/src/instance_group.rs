// lib/crates/nodeup-api/src/instance_group.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::ObjectMeta;
use crate::kubelet::KubeletConfigSpec;
use crate::role::Role;

/// Instance group document (`instancegroup.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceGroup {
    #[serde(rename = "apiVersion", default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: InstanceGroupSpec,
}

/// Per-group overrides layered on top of the cluster settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroupSpec {
    #[serde(default)]
    pub role: Role,
    /// Kubelet override; wins over the cluster-level kubelet on overlap.
    #[serde(default)]
    pub kubelet: Option<KubeletConfigSpec>,
    /// Labels applied to the node; they replace any computed label.
    #[serde(default)]
    pub node_labels: BTreeMap<String, String>,
    /// `key=value:effect` taints, in the order they should be registered.
    #[serde(default)]
    pub taints: Vec<String>,
}
