//! The scratch note that stages rewritten content between pipeline stages

use crate::error::Result;
use crate::io::vault::Vault;
use std::path::{Path, PathBuf};

/// Vault-relative location of the scratch note
pub const SCRATCH_FILE: &str = "ghost-upload-preview.md";

/// Handle to the persisted scratch note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `content` to the scratch note, overwriting a previous run
    pub async fn persist(vault: &dyn Vault, content: &str) -> Result<Self> {
        let path = PathBuf::from(SCRATCH_FILE);
        if vault.exists(&path).await {
            log::debug!("Overwriting {}", SCRATCH_FILE);
            vault.modify(&path, content).await?;
        } else {
            log::debug!("Creating {}", SCRATCH_FILE);
            vault.create(&path, content).await?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the staged content back
    pub async fn read(&self, vault: &dyn Vault) -> Result<String> {
        vault.read(&self.path).await
    }
}
