//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::config::NodeupConfig;
use crate::domain::error::NetworkLookupError;
use crate::domain::task::Task;

// ── Build Collaborator Ports ──────────────────────────────────────────────────

/// Repository of downloaded binaries and archives.
pub trait AssetStore {
    /// Bytes of the asset called `name`, optionally narrowed to one under
    /// `path`. `Ok(None)` means no such asset; `Err` means the lookup itself
    /// broke.
    fn find(&self, name: &str, path: Option<&str>) -> Result<Option<Vec<u8>>>;
}

/// Source of cluster PKI material, keyed by keypair id (`ca`, `kubelet`, ...).
pub trait KeyStore {
    /// PEM-encoded certificate for `id`.
    fn certificate(&self, id: &str) -> Result<Vec<u8>>;
    /// PEM-encoded private key for `id`.
    fn private_key(&self, id: &str) -> Result<Vec<u8>>;
}

/// Cloud instance metadata, e.g. `local-ipv4`.
pub trait MetadataService {
    /// Look up one metadata key. Called at most once per key per build.
    fn get_metadata(&self, key: &str) -> Result<String, NetworkLookupError>;
}

/// The convergence engine's intake. Accepts tasks in application order.
pub trait TaskSink {
    fn add_task(&mut self, task: Task);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading nodeup's own configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<NodeupConfig>;
    /// Path of the configuration file in effect.
    fn path(&self) -> PathBuf;
}

impl TaskSink for Vec<Task> {
    fn add_task(&mut self, task: Task) {
        self.push(task);
    }
}
