//! The publish pipeline
//!
//! Publishing runs two sequential stages: local images are uploaded and their
//! embeds rewritten into a scratch note ([`Publisher::upload_images`]), then the
//! scratch note is turned into a post and submitted ([`Publisher::publish`]).
//! Every collaborator is passed in explicitly.

pub mod images;
pub mod post;

use crate::config::Settings;
use crate::error::PublishError;
use crate::ghost::GhostApi;
use crate::io::{LinkResolver, Notifier, Vault};

pub const MISSING_SETTINGS_NOTICE: &str =
    "Ghost URL or Admin API Key is not set. Please check your plugin settings.";
pub const INVALID_KEY_NOTICE: &str = "Error: Ghost API Key is invalid.";
pub const NO_IMAGES_NOTICE: &str = "Cannot find images from notes.";

/// Notice for a local failure that stops the pipeline, e.g. `Couldn't build the post.`
pub fn failure_notice(action: &str, err: &PublishError) -> String {
    format!("Couldn't {}.\n\n{}: {}", action, err.kind_name(), err)
}

/// Runs the pipeline against a set of collaborators
pub struct Publisher<'a> {
    pub settings: &'a Settings,
    pub vault: &'a dyn Vault,
    pub resolver: &'a dyn LinkResolver,
    pub api: &'a dyn GhostApi,
    pub notifier: &'a dyn Notifier,
}

impl<'a> Publisher<'a> {
    pub fn new(
        settings: &'a Settings,
        vault: &'a dyn Vault,
        resolver: &'a dyn LinkResolver,
        api: &'a dyn GhostApi,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            settings,
            vault,
            resolver,
            api,
            notifier,
        }
    }

    /// Report `err` through the notifier and hand it back for returning
    fn fail(&self, action: &str, err: PublishError) -> PublishError {
        log::warn!("Couldn't {}: {}", action, err);
        self.notifier.notice(&failure_notice(action, &err));
        err
    }

    fn missing_settings_error(&self) -> PublishError {
        self.settings
            .ensure_complete()
            .err()
            .unwrap_or_else(|| PublishError::missing_setting("url"))
    }
}
