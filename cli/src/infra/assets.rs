//! Filesystem implementation of the `AssetStore` port.
//!
//! Assets are plain files named after the asset, anywhere below one of the
//! configured directories. Directories are searched in configuration order;
//! within a directory entries are visited in name order so the same tree
//! always yields the same file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::AssetStore;

/// Asset store backed by local directories.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    roots: Vec<PathBuf>,
}

impl DirAssetStore {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetStore for DirAssetStore {
    fn find(&self, name: &str, path: Option<&str>) -> Result<Option<Vec<u8>>> {
        for root in &self.roots {
            if !root.is_dir() {
                tracing::debug!(root = %root.display(), "asset directory missing, skipping");
                continue;
            }
            let found = match path {
                Some(sub) => {
                    let candidate = root.join(sub.trim_start_matches('/')).join(name);
                    candidate.is_file().then_some(candidate)
                }
                None => search(root, name)?,
            };
            if let Some(file) = found {
                tracing::debug!(asset = name, file = %file.display(), "found asset");
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("cannot read {}", file.display()))?;
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

fn search(dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot list {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("cannot list {}", dir.display()))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in &entries {
        let path = entry.path();
        if path.is_file() && entry.file_name() == name {
            return Ok(Some(path));
        }
    }
    for entry in &entries {
        let path = entry.path();
        // file_type does not follow symlinks, so linked directories are skipped
        if entry.file_type().is_ok_and(|t| t.is_dir())
            && let Some(found) = search(&path, name)?
        {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
