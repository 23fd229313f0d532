//! Human-readable terminal renderer.

#![allow(clippy::format_push_string)]

use std::path::Path;

use anyhow::{Context, Result};
use nodeup_api::KubeletConfigSpec;
use owo_colors::OwoColorize as _;
use owo_colors::Style;

use crate::domain::config::NodeupConfig;
use crate::domain::task::{Contents, FileKind, Task};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("nodeup v{version}"));
    }

    /// Render the task plan, one task per line.
    pub fn render_plan(&self, tasks: &[Task]) {
        self.ctx.header(&format!("Plan ({} tasks)", tasks.len()));
        if !self.ctx.quiet {
            println!();
        }
        for (index, task) in tasks.iter().enumerate() {
            let (marker, style) = self.marker(task);
            println!(
                "  {:>2}. {} {}",
                index + 1,
                format!("{marker:<8}").style(style),
                describe(task)
            );
        }
        if !self.ctx.quiet {
            println!();
        }
        self.ctx.success("Plan complete.");
    }

    /// Render a resolved kubelet configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn render_kubelet_config(&self, config: &KubeletConfigSpec) -> Result<()> {
        let yaml = serde_yaml::to_string(config).context("cannot serialize kubelet config")?;
        print!("{yaml}");
        Ok(())
    }

    /// Render a systemd unit verbatim.
    pub fn render_unit(&self, text: &str) {
        print!("{text}");
    }

    /// Render the current nodeup configuration.
    pub fn render_config(&self, config: &NodeupConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in [
            ("assets.paths:", config.assets.paths.join(", ")),
            ("keystore.path:", config.keystore.path.clone()),
            ("metadata.endpoint:", config.metadata.endpoint.clone()),
            ("metadata.timeout_secs:", config.metadata.timeout_secs.to_string()),
        ] {
            self.ctx.kv(&format!("{key:<24}"), &value);
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["NODEUP_CONFIG", "RUST_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render a single configuration value.
    pub fn render_value(&self, value: &str) {
        println!("{value}");
    }

    fn marker(&self, task: &Task) -> (&'static str, Style) {
        let styles = &self.ctx.styles;
        match task {
            Task::File {
                kind: FileKind::Directory,
                ..
            } => ("dir", styles.file),
            Task::File { .. } => ("file", styles.file),
            Task::Service { .. } => ("service", styles.service),
            Task::Archive { .. } => ("archive", styles.mount),
            Task::BindMount { .. } => ("mount", styles.mount),
        }
    }
}

/// One-line description of a task.
#[must_use]
pub fn describe(task: &Task) -> String {
    match task {
        Task::File {
            path,
            contents,
            mode,
            ..
        } => {
            let mut line = path.clone();
            if let Some(bits) = mode {
                line.push_str(&format!(" mode={bits:04o}"));
            }
            match contents {
                Some(asset @ Contents::Asset { name, bytes }) => {
                    let digest = asset.sha256();
                    line.push_str(&format!(
                        " from asset {name} ({} bytes, sha256 {})",
                        bytes.len(),
                        &digest[..12]
                    ));
                }
                Some(Contents::Text(text)) => {
                    line.push_str(&format!(" ({} bytes)", text.len()));
                }
                Some(Contents::Secret(text)) => {
                    line.push_str(&format!(" ({} bytes, secret)", text.len()));
                }
                None => {}
            }
            line
        }
        Task::Service { name, running, .. } => {
            let state = if *running { "running" } else { "installed, not started" };
            format!("{name} ({state})")
        }
        Task::Archive {
            name,
            source,
            target_dir,
            ..
        } => format!("{name} {source} -> {target_dir}"),
        Task::BindMount {
            source,
            mountpoint,
            options,
            recursive,
        } => {
            let mut opts: Vec<&str> = options.iter().map(String::as_str).collect();
            if *recursive {
                opts.push("rbind");
            }
            format!("{source} -> {mountpoint} [{}]", opts.join(","))
        }
    }
}
