//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: asset and key lookup on the
//! local filesystem, instance metadata over HTTP, and document loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod config;
pub mod distro;
pub mod keystore;
pub mod metadata;
