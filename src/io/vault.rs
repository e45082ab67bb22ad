//! Access to the notes vault
//!
//! The pipeline never touches the filesystem directly: it receives a [`Vault`]
//! for reading and writing notes and a [`LinkResolver`] for turning an embed
//! name into an attached file. [`FsVault`] implements both over a directory.

use crate::error::{PublishError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Reading and writing vault files by vault-relative path
#[async_trait]
pub trait Vault: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String>;

    async fn read_binary(&self, path: &Path) -> Result<Vec<u8>>;

    async fn exists(&self, path: &Path) -> bool;

    /// Create a new file; fails if it already exists
    async fn create(&self, path: &Path, content: &str) -> Result<()>;

    /// Overwrite an existing file
    async fn modify(&self, path: &Path, content: &str) -> Result<()>;
}

/// Maps an embed name, relative to the embedding note, to a vault file
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve_link(&self, link: &str, source_path: &Path) -> Option<Asset>;
}

/// An attached file in the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    path: PathBuf,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Vault-relative path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Vault-relative path with `/` separators
    pub fn path_ref(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Media type derived from the extension, e.g. `image/png`
    pub fn media_type(&self) -> String {
        format!("image/{}", self.extension())
    }
}

/// A note loaded from the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Vault-relative path
    pub path: PathBuf,
    pub content: String,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note through a vault
    pub async fn load(vault: &dyn Vault, path: &Path) -> Result<Self> {
        if !vault.exists(path).await {
            return Err(PublishError::note_not_found(path));
        }
        let content = vault.read(path).await?;
        Ok(Self::new(path, content))
    }

    /// File name without extension
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A vault backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault-relative path
    pub fn full_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Turn a path given on the command line into a vault-relative one
    pub fn relativize(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(normalize(path));
        }
        let root = self.root.canonicalize()?;
        let absolute = path.canonicalize().map_err(|_| PublishError::note_not_found(path))?;
        absolute
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .map_err(|_| PublishError::note_not_found(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.full_path(path).is_file()
    }

    /// Next to the source note first, then from the vault root, then anywhere in the vault
    fn resolve_blocking(&self, link: &str, source_path: &Path) -> Option<Asset> {
        let link_path = normalize(Path::new(link));
        let source_dir = source_path.parent().unwrap_or_else(|| Path::new(""));

        let beside_note = normalize(&source_dir.join(&link_path));
        if self.is_file(&beside_note) {
            return Some(Asset::new(beside_note));
        }
        if self.is_file(&link_path) {
            return Some(Asset::new(link_path));
        }

        let found = self.search_by_suffix(&link_path).map(Asset::new);
        if found.is_none() {
            log::debug!("No vault file matches link {}", link);
        }
        found
    }

    fn search_by_suffix(&self, link: &Path) -> Option<PathBuf> {
        let file_name = link.file_name()?;
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
            .filter_map(|entry| entry.path().strip_prefix(&self.root).ok().map(Path::to_path_buf))
            .find(|relative| relative.ends_with(link))
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let full = self.full_path(path);
        let content = content.to_string();
        tokio::task::spawn_blocking(move || write_file_atomic(&full, &content))
            .await
            .map_err(|e| PublishError::Io(std::io::Error::other(e)))?
    }
}

fn write_file_atomic(full: &Path, content: &str) -> Result<()> {
    let parent_dir = full.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(full).map_err(|e| {
        PublishError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file: {}",
            e
        )))
    })?;
    Ok(())
}

#[async_trait]
impl Vault for FsVault {
    async fn read(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.full_path(path)).await?)
    }

    async fn read_binary(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.full_path(path)).await?)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(self.full_path(path))
            .await
            .unwrap_or(false)
    }

    async fn create(&self, path: &Path, content: &str) -> Result<()> {
        if self.exists(path).await {
            return Err(PublishError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        self.write_atomic(path, content).await
    }

    async fn modify(&self, path: &Path, content: &str) -> Result<()> {
        if !self.exists(path).await {
            return Err(PublishError::note_not_found(path));
        }
        self.write_atomic(path, content).await
    }
}

#[async_trait]
impl LinkResolver for FsVault {
    async fn resolve_link(&self, link: &str, source_path: &Path) -> Option<Asset> {
        let vault = self.clone();
        let link = link.to_string();
        let source_path = source_path.to_path_buf();
        tokio::task::spawn_blocking(move || vault.resolve_blocking(&link, &source_path))
            .await
            .unwrap_or_else(|err| {
                log::warn!("Link resolution stopped: {}", err);
                None
            })
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Resolve `.` and `..` lexically, keeping the path relative
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}
