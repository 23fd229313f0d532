//! Host resource declarations handed to the convergence engine.
//!
//! A `Task` says what should exist on the host, never how to get there.
//! Builders return them in the order they must be applied.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// File permission bits for executables.
pub const MODE_EXECUTABLE: u32 = 0o755;
/// File permission bits for credentials readable only by root.
pub const MODE_SECRET: u32 = 0o400;

/// Whether a file task declares a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

/// Payload of a file task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Rendered text (unit files, environment files, kubeconfigs).
    Text(String),
    /// Bytes of a named asset (binaries).
    Asset { name: String, bytes: Vec<u8> },
    /// Credential text. Only its digest and size are ever serialized.
    Secret(String),
}

impl Contents {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) | Self::Secret(text) => text.as_bytes(),
            Self::Asset { bytes, .. } => bytes,
        }
    }

    /// Hex SHA-256 of the payload.
    #[must_use]
    pub fn sha256(&self) -> String {
        format!("{:x}", Sha256::digest(self.as_bytes()))
    }
}

impl Serialize for Contents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct AssetRef<'a> {
            asset: &'a str,
            sha256: String,
            size: usize,
        }

        #[derive(Serialize)]
        struct SecretRef {
            secret: bool,
            sha256: String,
            size: usize,
        }

        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Asset { name, bytes } => AssetRef {
                asset: name,
                sha256: self.sha256(),
                size: bytes.len(),
            }
            .serialize(serializer),
            Self::Secret(text) => SecretRef {
                secret: true,
                sha256: self.sha256(),
                size: text.len(),
            }
            .serialize(serializer),
        }
    }
}

/// One declared host resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    File {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<Contents>,
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_mode"
        )]
        mode: Option<u32>,
        kind: FileKind,
    },
    Service {
        name: String,
        definition: String,
        running: bool,
    },
    Archive {
        name: String,
        source: String,
        hash: String,
        target_dir: String,
    },
    BindMount {
        source: String,
        mountpoint: String,
        options: BTreeSet<String>,
        recursive: bool,
    },
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn serialize_mode<S: Serializer>(mode: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    match mode {
        Some(bits) => serializer.serialize_str(&format!("{bits:04o}")),
        None => serializer.serialize_none(),
    }
}

impl Task {
    /// A regular file.
    #[must_use]
    pub fn file(path: impl Into<String>, contents: Contents, mode: Option<u32>) -> Self {
        let path = path.into();
        debug_assert!(path.starts_with('/'), "relative path {path}");
        Self::File {
            path,
            contents: Some(contents),
            mode,
            kind: FileKind::File,
        }
    }

    /// A directory.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        debug_assert!(path.starts_with('/'), "relative path {path}");
        Self::File {
            path,
            contents: None,
            mode: None,
            kind: FileKind::Directory,
        }
    }

    /// A bind mount of `source` onto `mountpoint`.
    #[must_use]
    pub fn bind_mount(
        source: impl Into<String>,
        mountpoint: impl Into<String>,
        options: &[&str],
        recursive: bool,
    ) -> Self {
        let mountpoint = mountpoint.into();
        debug_assert!(mountpoint.starts_with('/'), "relative mountpoint {mountpoint}");
        Self::BindMount {
            source: source.into(),
            mountpoint,
            options: options.iter().map(|o| (*o).to_string()).collect(),
            recursive,
        }
    }

    /// Identity of the resource this task manages: its kind plus its
    /// target. No two tasks of one build may share a key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::File { path, .. } => format!("file:{path}"),
            Self::Service { name, .. } => format!("service:{name}"),
            Self::Archive { name, .. } => format!("archive:{name}"),
            Self::BindMount { mountpoint, .. } => format!("mount:{mountpoint}"),
        }
    }

    /// Filesystem path the task writes or mounts onto, if any.
    #[must_use]
    pub fn target_path(&self) -> Option<&str> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Archive { target_dir, .. } => Some(target_dir),
            Self::BindMount { mountpoint, .. } => Some(mountpoint),
            Self::Service { .. } => None,
        }
    }
}

/// Keys that occur more than once in `tasks`, in first-seen order.
#[must_use]
pub fn duplicate_keys(tasks: &[Task]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();
    for task in tasks {
        let key = task.key();
        if !seen.insert(key.clone()) && !duplicates.contains(&key) {
            duplicates.push(key);
        }
    }
    duplicates
}
