//! Command implementations

pub mod config;
pub mod kubelet_config;
pub mod plan;
pub mod unit;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use nodeup_api::{Cluster, InstanceGroup, Role};

use crate::domain::distro::Distribution;
use crate::infra::config::{load_cluster, load_instance_group};
use crate::infra::distro::{OS_RELEASE_PATH, detect_distribution};

/// Arguments identifying the node to plan for.
#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Cluster document (YAML)
    #[arg(long, value_name = "FILE")]
    pub cluster: PathBuf,

    /// Instance group document (YAML)
    #[arg(long, value_name = "FILE")]
    pub instance_group: PathBuf,

    #[command(flatten)]
    pub distro: DistroArgs,

    /// Override the role from the instance group
    #[arg(long, value_enum)]
    pub role: Option<Role>,
}

/// Arguments selecting the host distribution.
#[derive(Args, Debug)]
pub struct DistroArgs {
    /// Host distribution (detected from os-release when omitted)
    #[arg(long, value_enum)]
    pub distro: Option<Distribution>,

    #[arg(long, hide = true, default_value = OS_RELEASE_PATH)]
    pub os_release: PathBuf,
}

impl DistroArgs {
    /// The chosen distribution, detecting it when not given.
    ///
    /// # Errors
    ///
    /// Returns an error if detection fails.
    pub fn resolve(&self) -> Result<Distribution> {
        match self.distro {
            Some(distro) => Ok(distro),
            None => detect_distribution(&self.os_release),
        }
    }
}

/// Loaded inputs for a node.
pub struct NodeInputs {
    pub cluster: Cluster,
    pub instance_group: InstanceGroup,
    pub role: Role,
    pub distro: Distribution,
}

impl NodeArgs {
    /// Load both documents and settle role and distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be loaded or the distribution
    /// cannot be determined.
    pub fn load(&self) -> Result<NodeInputs> {
        let cluster = load_cluster(&self.cluster)?;
        let instance_group = load_instance_group(&self.instance_group)?;
        let role = self.role.unwrap_or(instance_group.spec.role);
        let distro = self.distro.resolve()?;
        tracing::info!(
            cluster = %cluster.metadata.name,
            instance_group = %instance_group.metadata.name,
            %role,
            %distro,
            "loaded node inputs"
        );
        Ok(NodeInputs {
            cluster,
            instance_group,
            role,
            distro,
        })
    }
}
