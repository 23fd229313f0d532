//! `nodeup plan`: print the kubelet tasks for a node.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::deliver;
use crate::application::services::kubelet::{NodeSpec, plan_kubelet};
use crate::commands::NodeArgs;

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or the build fails.
pub fn run(app: &AppContext, args: &NodeArgs) -> Result<ExitCode> {
    let inputs = args.load()?;
    let adapters = app.adapters()?;

    let node = NodeSpec {
        cluster: &inputs.cluster.spec,
        instance_group: Some(&inputs.instance_group.spec),
        role: inputs.role,
        distro: inputs.distro,
    };
    let tasks = plan_kubelet(&node, &adapters.assets, &adapters.keystore, &adapters.metadata)?;

    let mut plan = Vec::with_capacity(tasks.len());
    deliver(tasks, &mut plan);
    app.renderer().render_plan(&plan)?;
    Ok(ExitCode::SUCCESS)
}
