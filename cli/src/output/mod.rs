//! Output formatting module

pub mod human;
pub mod json;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use nodeup_api::KubeletConfigSpec;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

use crate::domain::config::NodeupConfig;
use crate::domain::task::Task;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Output mode chosen from `--json`, dispatching to the matching renderer.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render an ordered task plan.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_plan(&self, tasks: &[Task]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_plan(tasks);
                Ok(())
            }
            Self::Json(r) => r.render_plan(tasks),
        }
    }

    /// Render a resolved kubelet configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_kubelet_config(&self, config: &KubeletConfigSpec) -> Result<()> {
        match self {
            Self::Human(r) => r.render_kubelet_config(config),
            Self::Json(r) => r.render_kubelet_config(config),
        }
    }

    /// Render a systemd unit.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_unit(&self, name: &str, text: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_unit(text);
                Ok(())
            }
            Self::Json(r) => r.render_unit(name, text),
        }
    }

    /// Render nodeup's effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &NodeupConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// Render a single configuration value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_value(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_value(value);
                Ok(())
            }
            Self::Json(r) => r.render_value(key, value),
        }
    }

    /// Render version information.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }
}
