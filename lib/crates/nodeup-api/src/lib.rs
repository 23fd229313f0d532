//! Cluster and instance group documents read by nodeup.
//!
//! These types mirror the YAML manifests an operator writes. They are
//! read-only inputs: nothing in this crate decides how a node is configured.

pub mod cluster;
pub mod instance_group;
pub mod kubelet;
pub mod role;

pub use cluster::{
    CloudConfiguration, Cluster, ClusterSpec, NetworkingMode, NetworkingSpec, ObjectMeta,
    PluginSettings,
};
pub use instance_group::{InstanceGroup, InstanceGroupSpec};
pub use kubelet::KubeletConfigSpec;
pub use role::Role;
