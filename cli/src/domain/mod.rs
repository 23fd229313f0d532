//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod distro;
pub mod error;
pub mod flags;
pub mod kubeconfig;
pub mod labels;
pub mod merge;
pub mod systemd;
pub mod task;
pub mod version;

pub use config::{NodeupConfig, validate_config_key, validate_config_value};
pub use distro::Distribution;
pub use error::{AssetError, BuildCause, BuildError, BuildStage, ConfigError, NetworkLookupError};
pub use task::{Contents, FileKind, Task};
pub use version::KubernetesVersion;
