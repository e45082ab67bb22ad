//! Plugin settings
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables and command-line flags. Once built they are never
//! mutated by the pipeline.

use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the settings file looked up in the vault root
pub const DEFAULT_CONFIG_FILE: &str = ".ghostpost.yaml";

/// Connection settings for the Ghost blog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the blog, e.g. `https://blog.example.com`
    pub url: String,
    /// Admin API key in `id:secret_hex` form
    #[serde(alias = "adminToken", alias = "admin_key")]
    pub admin_token: String,
    /// Verbose diagnostics
    pub debug: bool,
}

/// Values that take precedence over whatever the settings file says
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub url: Option<String>,
    pub admin_token: Option<String>,
    pub debug: bool,
}

impl Settings {
    pub fn new(url: impl Into<String>, admin_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            admin_token: admin_token.into(),
            debug: false,
        }
    }

    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Load settings from an explicit file, or from the vault's default file when it exists
    pub fn load(explicit: Option<&Path>, vault_root: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = vault_root.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    log::debug!("Loading settings from {}", candidate.display());
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply overrides on top of these settings
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(url) = overrides.url {
            self.url = url;
        }
        if let Some(admin_token) = overrides.admin_token {
            self.admin_token = admin_token;
        }
        self.debug |= overrides.debug;
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Whether both the URL and the admin key are present
    pub fn is_complete(&self) -> bool {
        !self.base_url().is_empty() && !self.admin_token.trim().is_empty()
    }

    /// Fail with the first missing field
    pub fn ensure_complete(&self) -> Result<()> {
        if self.base_url().is_empty() {
            return Err(PublishError::missing_setting("url"));
        }
        if self.admin_token.trim().is_empty() {
            return Err(PublishError::missing_setting("admin_token"));
        }
        Ok(())
    }
}
