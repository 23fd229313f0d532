//! `nodeup unit`: print the kubelet systemd unit.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::DistroArgs;
use crate::domain::systemd::{KUBELET_SERVICE, kubelet_unit};

/// Run the unit command.
///
/// # Errors
///
/// Returns an error if the distribution cannot be determined.
pub fn run(app: &AppContext, args: &DistroArgs) -> Result<ExitCode> {
    let distro = args.resolve()?;
    app.renderer()
        .render_unit(KUBELET_SERVICE, &kubelet_unit(distro))?;
    Ok(ExitCode::SUCCESS)
}
