//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::NoteArgs;
use anyhow::{bail, Context, Result};
use ghostpost::publish::{INVALID_KEY_NOTICE, MISSING_SETTINGS_NOTICE};
use ghostpost::{
    AdminKey, AdminToken, FsVault, GhostClient, Note, Notifier, Publisher, Settings,
};
use log::{debug, info};

/// Everything a command needs besides its own arguments
pub struct CommandContext<'a> {
    pub settings: &'a Settings,
    pub vault: FsVault,
    pub notifier: &'a dyn Notifier,
}

impl CommandContext<'_> {
    async fn load_note(&self, args: &NoteArgs) -> Result<Note> {
        let path = self
            .vault
            .relativize(&args.note)
            .with_context(|| format!("{} is not inside the vault", args.note.display()))?;
        debug!("Loading note {}", path.display());
        Ok(Note::load(&self.vault, &path).await?)
    }

    fn sign_token(&self) -> Result<AdminToken> {
        let key = match AdminKey::parse(&self.settings.admin_token) {
            Ok(key) => key,
            Err(err) => {
                self.notifier.notice(INVALID_KEY_NOTICE);
                return Err(err.into());
            }
        };
        Ok(AdminToken::sign(&key)?)
    }
}

/// Execute the publish command
pub async fn publish_command(ctx: &CommandContext<'_>, args: NoteArgs) -> Result<()> {
    let note = ctx.load_note(&args).await?;
    let client = GhostClient::from_settings(ctx.settings)?;
    let publisher = Publisher::new(ctx.settings, &ctx.vault, &ctx.vault, &client, ctx.notifier);

    let outcome = publisher.publish(&note).await?;
    if !outcome.is_published() {
        bail!("Ghost rejected {}", note.path.display());
    }
    info!("Published {}", note.path.display());
    Ok(())
}

/// Execute the upload-images command
pub async fn upload_images_command(ctx: &CommandContext<'_>, args: NoteArgs) -> Result<()> {
    if let Err(err) = ctx.settings.ensure_complete() {
        ctx.notifier.notice(MISSING_SETTINGS_NOTICE);
        return Err(err.into());
    }
    let note = ctx.load_note(&args).await?;
    let token = ctx.sign_token()?;
    let client = GhostClient::from_settings(ctx.settings)?;
    let publisher = Publisher::new(ctx.settings, &ctx.vault, &ctx.vault, &client, ctx.notifier);

    match publisher.upload_images(&note, &token).await? {
        Some(scratch) => {
            println!("{}", ctx.vault.full_path(scratch.path()).display());
            Ok(())
        }
        None => bail!("settings are incomplete"),
    }
}

/// Execute the token command
pub fn token_command(ctx: &CommandContext<'_>) -> Result<()> {
    let token = ctx.sign_token()?;
    println!("{}", token);
    Ok(())
}
