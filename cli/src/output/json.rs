//! JSON output helpers.
//!
//! Every `--json` document is a single pretty-printed object on stdout.
//! Failures use the error object from `format_error`.

use std::path::Path;

use anyhow::{Context, Result};
use nodeup_api::KubeletConfigSpec;
use serde::Serialize;

use crate::domain::config::NodeupConfig;
use crate::domain::task::Task;

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the task plan as `{"tasks": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_plan(&self, tasks: &[Task]) -> Result<()> {
        print_json(&serde_json::json!({ "tasks": tasks }))
    }

    /// Render the kubelet configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_kubelet_config(&self, config: &KubeletConfigSpec) -> Result<()> {
        print_json(config)
    }

    /// Render a unit as `{"name": ..., "definition": ...}`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_unit(&self, name: &str, text: &str) -> Result<()> {
        print_json(&serde_json::json!({ "name": name, "definition": text }))
    }

    /// Render the configuration together with its source path.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &NodeupConfig, path: &Path) -> Result<()> {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// Render a single setting.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_value(&self, key: &str, value: &str) -> Result<()> {
        print_json(&serde_json::json!({ "key": key, "value": value }))
    }

    /// Render version information.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
