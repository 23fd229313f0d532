//! `nodeup kubelet-config`: print the resolved kubelet configuration.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::kubelet_config::resolve_kubelet_config;
use crate::commands::NodeArgs;

/// Run the kubelet-config command.
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or do not resolve.
pub fn run(app: &AppContext, args: &NodeArgs) -> Result<ExitCode> {
    let inputs = args.load()?;
    let config = resolve_kubelet_config(
        &inputs.cluster.spec,
        Some(&inputs.instance_group.spec),
        inputs.role,
        inputs.distro,
    )?;
    app.renderer().render_kubelet_config(&config)?;
    Ok(ExitCode::SUCCESS)
}
