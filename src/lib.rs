//! ghostpost: publish markdown notes to a Ghost blog
//!
//! This library takes a note from a vault of markdown files, uploads the local
//! images it embeds, rewrites those embeds to the uploaded URLs, renders the note
//! to HTML and creates a post through the Ghost Admin API. It is the foundation
//! of the `ghostpost` command-line tool.
//!
//! # Features
//!
//! - **Image embeds** (`![[cat.png]]`) are uploaded and rewritten, including
//!   embeds inside blockquotes and in front matter values such as `feature_image`
//! - **Front matter** provides the post title, tags, slug, excerpt and status
//! - **Short-lived admin tokens** signed from an `id:secret` admin API key
//! - **Explicit collaborators**: vault access, link resolution, the API and user
//!   notices are traits, so the pipeline runs the same against a real blog or fakes
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ghostpost::{ConsoleNotifier, FsVault, GhostClient, Note, Publisher, Result, Settings};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::new("https://blog.example.com", "id:0123abcd");
//!     let vault = FsVault::new("/home/me/notes");
//!     let client = GhostClient::from_settings(&settings)?;
//!     let notifier = ConsoleNotifier::default();
//!
//!     let note = Note::load(&vault, Path::new("posts/hello.md")).await?;
//!     let publisher = Publisher::new(&settings, &vault, &vault, &client, &notifier);
//!     let outcome = publisher.publish(&note).await?;
//!     println!("published: {}", outcome.is_published());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: pure text logic (embed scanning and rewriting, front matter, post building)
//! - [`ghost`]: the Admin API (token signing, wire types, HTTP client)
//! - [`io`]: vault access, link resolution, notices and the scratch note
//! - [`publish`]: the two pipeline stages
//! - [`config`]: settings loading
//! - [`error`]: error types

// Public API exports
pub use config::{Settings, SettingsOverrides};
pub use error::{PublishError, Result};

// Core types
pub use crate::core::{GhostPost, ImageMatch, PostEnvelope, PostMetadata, PostStatus};

// Ghost API types
pub use ghost::{AdminKey, AdminToken, GhostApi, GhostClient, ImageUpload, PublishOutcome};

// IO types
pub use io::{
    Asset, ConsoleNotifier, FsVault, LinkResolver, MemoryNotifier, Note, Notifier, ScratchFile,
    Vault, SCRATCH_FILE,
};

pub use publish::Publisher;

pub mod config;
pub mod core;
pub mod error;
pub mod ghost;
pub mod io;
pub mod publish;

// CLI components are available only in the binary, not as part of the library API
