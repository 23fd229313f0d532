// lib/crates/nodeup-api/src/cluster.rs

use serde::{Deserialize, Serialize};

use crate::kubelet::KubeletConfigSpec;

/// Cluster document (`cluster.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(rename = "apiVersion", default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ClusterSpec,
}

/// Name and labels shared by every document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
}

/// Cluster-wide settings a node needs while bootstrapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Semantic version of the control plane, e.g. `1.9.3` or `v1.9.3`.
    pub kubernetes_version: String,
    /// DNS name workers use to reach the API server.
    #[serde(default)]
    pub master_internal_name: String,
    /// Kubelet settings applied to every worker.
    #[serde(default)]
    pub kubelet: Option<KubeletConfigSpec>,
    /// Kubelet settings applied to every control-plane member.
    #[serde(default)]
    pub master_kubelet: Option<KubeletConfigSpec>,
    /// Present when the cloud provider needs a config file on the node.
    #[serde(default)]
    pub cloud_config: Option<CloudConfiguration>,
    #[serde(default)]
    pub networking: Option<NetworkingSpec>,
}

impl ClusterSpec {
    /// The networking mode in use, or `None` when the document has no
    /// networking section.
    #[must_use]
    pub fn networking_mode(&self) -> Option<NetworkingMode> {
        self.networking.as_ref().and_then(NetworkingSpec::mode)
    }
}

/// Settings written to the cloud provider config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudConfiguration {
    #[serde(default)]
    pub multizone: Option<bool>,
    #[serde(default)]
    pub node_tags: Option<String>,
    #[serde(default)]
    pub node_instance_prefix: Option<String>,
}

/// Plugin-specific settings. The kubelet stage only cares which plugin is
/// selected, so the body is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {}

/// Networking section: exactly one member is expected to be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct NetworkingSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classic: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubenet: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cni: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kopeio: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weave: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flannel: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calico: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canal: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kuberouter: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romana: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazonvpc: Option<PluginSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cilium: Option<PluginSettings>,
}

/// Which networking provider a cluster selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkingMode {
    Classic,
    Kubenet,
    External,
    Cni,
    Kopeio,
    Weave,
    Flannel,
    Calico,
    Canal,
    KubeRouter,
    Romana,
    AmazonVpc,
    Cilium,
}

impl NetworkingMode {
    /// Whether the kubelet talks to this provider through CNI.
    ///
    /// `classic` uses no plugin at all and `kubenet` is configured with its
    /// own flags.
    #[must_use]
    pub fn uses_cni(self) -> bool {
        !matches!(self, Self::Classic | Self::Kubenet)
    }
}

impl NetworkingSpec {
    /// The first selected provider, in declaration order.
    #[must_use]
    pub fn mode(&self) -> Option<NetworkingMode> {
        let candidates = [
            (self.classic.is_some(), NetworkingMode::Classic),
            (self.kubenet.is_some(), NetworkingMode::Kubenet),
            (self.external.is_some(), NetworkingMode::External),
            (self.cni.is_some(), NetworkingMode::Cni),
            (self.kopeio.is_some(), NetworkingMode::Kopeio),
            (self.weave.is_some(), NetworkingMode::Weave),
            (self.flannel.is_some(), NetworkingMode::Flannel),
            (self.calico.is_some(), NetworkingMode::Calico),
            (self.canal.is_some(), NetworkingMode::Canal),
            (self.kuberouter.is_some(), NetworkingMode::KubeRouter),
            (self.romana.is_some(), NetworkingMode::Romana),
            (self.amazonvpc.is_some(), NetworkingMode::AmazonVpc),
            (self.cilium.is_some(), NetworkingMode::Cilium),
        ];
        candidates
            .into_iter()
            .find_map(|(set, mode)| set.then_some(mode))
    }
}
