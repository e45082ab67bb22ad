//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand};
use ghostpost::SettingsOverrides;
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "ghostpost",
    version,
    about = "Publish markdown notes and their images to a Ghost blog",
    long_about = "ghostpost uploads the local images a note embeds, rewrites the embeds to the \
                  uploaded URLs, renders the note to HTML and creates a post through the \
                  Ghost Admin API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionOptions,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress notices
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a note's images and publish it as a post
    Publish(NoteArgs),
    /// Upload a note's images and write the rewritten note to the scratch file
    UploadImages(NoteArgs),
    /// Print a freshly signed admin API token
    Token,
}

/// Where the vault is and how to reach the blog
#[derive(Args, Debug, Clone)]
pub struct ConnectionOptions {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (defaults to .ghostpost.yaml in the vault root)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Blog URL, e.g. https://blog.example.com
    #[arg(long, global = true, env = "GHOST_URL")]
    pub url: Option<String>,

    /// Admin API key (id:secret)
    #[arg(long, global = true, env = "GHOST_ADMIN_API_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    /// Log debug details, including the outbound post
    #[arg(long, global = true)]
    pub debug: bool,
}

impl ConnectionOptions {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            url: self.url.clone(),
            admin_token: self.admin_key.clone(),
            debug: self.debug,
        }
    }
}

/// Arguments for commands operating on one note
#[derive(Args, Debug)]
pub struct NoteArgs {
    /// The note, relative to the vault root or as an absolute path inside it
    pub note: PathBuf,
}
