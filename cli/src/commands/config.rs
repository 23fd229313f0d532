//! `nodeup config`: show configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print one configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the key is unknown.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Get { key } => get_value(app, &key),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path();
    app.renderer().render_config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn get_value(app: &AppContext, key: &str) -> Result<ExitCode> {
    let value = config_service::get_value(&app.config_store, key)?;
    app.renderer().render_value(key, &value)?;
    Ok(ExitCode::SUCCESS)
}
