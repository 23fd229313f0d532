//! Filesystem implementation of the `KeyStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::KeyStore;

/// PEM files laid out as `<dir>/<id>.crt` and `<dir>/<id>.key`.
#[derive(Debug, Clone)]
pub struct FsKeyStore {
    dir: PathBuf,
}

impl FsKeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_pem(&self, file: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(file);
        let bytes =
            std::fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        if !bytes.starts_with(b"-----BEGIN ") {
            anyhow::bail!("{} is not PEM encoded", path.display());
        }
        Ok(bytes)
    }
}

impl KeyStore for FsKeyStore {
    fn certificate(&self, id: &str) -> Result<Vec<u8>> {
        self.read_pem(&format!("{id}.crt"))
    }

    fn private_key(&self, id: &str) -> Result<Vec<u8>> {
        self.read_pem(&format!("{id}.key"))
    }
}
