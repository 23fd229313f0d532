//! nodeup - kubelet stage of the node bootstrap

use std::process::ExitCode;

use clap::Parser;
use nodeup_cli::cli::Cli;
use nodeup_cli::output::OutputContext;
use nodeup_cli::output::json::format_error;
use owo_colors::OwoColorize as _;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let json = cli.json;
    let no_color = cli.no_color;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            match format_error(&format!("{e:#}"), "ERROR") {
                Ok(body) if json => println!("{body}"),
                _ => {
                    let ctx = OutputContext::new(no_color, false);
                    eprintln!("{} {e:#}", "Error:".style(ctx.styles.error));
                }
            }
            ExitCode::FAILURE
        }
    }
}
