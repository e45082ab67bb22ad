use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{publish_command, token_command, upload_images_command, CommandContext};
use ghostpost::{ConsoleNotifier, FsVault, PublishError, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        connection,
        verbose,
        quiet,
    } = Cli::parse();

    let settings = Settings::load(connection.config.as_deref(), &connection.vault)
        .context("failed to load settings")?
        .with_overrides(connection.overrides());

    init_logging(verbose, settings.debug);
    log::debug!("Vault root: {}", connection.vault.display());

    let notifier = ConsoleNotifier::new(quiet);
    let ctx = CommandContext {
        settings: &settings,
        vault: FsVault::new(&connection.vault),
        notifier: &notifier,
    };

    let result = match command {
        Commands::Publish(args) => publish_command(&ctx, args).await,
        Commands::UploadImages(args) => upload_images_command(&ctx, args).await,
        Commands::Token => token_command(&ctx),
    };

    if let Err(err) = &result {
        if err
            .downcast_ref::<PublishError>()
            .is_some_and(PublishError::is_configuration)
        {
            log::error!(
                "Set the blog URL and admin key in {}, through GHOST_URL and GHOST_ADMIN_API_KEY, or with --url and --admin-key",
                ghostpost::config::DEFAULT_CONFIG_FILE
            );
        }
    }
    result
}

fn init_logging(verbose: bool, debug: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if debug {
        builder.filter_module("ghostpost", LevelFilter::Debug);
    }
    builder.init();
}
