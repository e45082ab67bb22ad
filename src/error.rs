//! Error types for the ghostpost library
//!
//! This module provides the error taxonomy for the publish pipeline: configuration
//! problems that abort before any network activity, I/O and parsing failures, and
//! failures talking to the Ghost Admin API.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors (settings files, front matter)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A required setting is absent or empty
    #[error("Missing setting: {field}")]
    MissingSettings { field: String },

    /// The admin API key is not of the form `id:secret_hex`
    #[error("Invalid admin API key: {reason}")]
    InvalidAdminKey { reason: String },

    /// The note to publish does not exist in the vault
    #[error("Note not found: {path}")]
    NoteNotFound { path: PathBuf },

    /// Front matter could not be interpreted as post metadata
    #[error("Invalid front matter: {reason}")]
    InvalidFrontMatter { reason: String },

    /// The API answered with a shape we do not understand
    #[error("Unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a new missing setting error
    pub fn missing_setting(field: impl Into<String>) -> Self {
        Self::MissingSettings {
            field: field.into(),
        }
    }

    /// Create a new invalid admin key error
    pub fn invalid_admin_key(reason: impl Into<String>) -> Self {
        Self::InvalidAdminKey {
            reason: reason.into(),
        }
    }

    /// Create a new note not found error
    pub fn note_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NoteNotFound { path: path.into() }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            reason: reason.into(),
        }
    }

    /// Create a new unexpected response error
    pub fn unexpected_response(reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            reason: reason.into(),
        }
    }

    /// Configuration errors are detected before anything is sent over the network
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSettings { .. } | Self::InvalidAdminKey { .. }
        )
    }

    /// Short name of the failure, shown next to the message in connectivity notices
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Http(err) if err.is_connect() => "ConnectError",
            Self::Http(err) if err.is_timeout() => "TimeoutError",
            Self::Http(err) if err.is_decode() => "DecodeError",
            Self::Http(_) => "RequestError",
            Self::Json(_) => "SyntaxError",
            Self::Io(_) => "IoError",
            Self::Yaml(_) => "YamlError",
            Self::MissingSettings { .. } | Self::InvalidAdminKey { .. } => "ConfigError",
            Self::NoteNotFound { .. } => "NotFoundError",
            Self::InvalidFrontMatter { .. } => "FrontMatterError",
            Self::UnexpectedResponse { .. } => "ResponseError",
        }
    }
}
