// src/cli/handlers.rs
use anyhow::Result;
use inquire::{Password, PasswordDisplayMode};

use super::commands::{CliCommand, FavoritesCommand, GenerateArgs};
use crate::client::{ClientController, KeyValueStore, PasswordService};
use crate::core::config::Config;

// Handlers for one-shot CLI commands. Results and failures are rendered by the
// subscribed view; the returned error only decides the exit status.
pub async fn handle_command<S, K>(
    controller: &mut ClientController<S, K>,
    command: CliCommand,
    config: &Config,
) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    match command {
        CliCommand::Generate(args) => handle_generate(controller, &args, config.default_password_length).await,
        CliCommand::Check { password } => handle_check(controller, password).await,
        CliCommand::History => {
            controller.fetch_history().await?;
            Ok(())
        }
        CliCommand::ClearHistory => {
            controller.clear_history().await;
            Ok(())
        }
        CliCommand::ExportHistory { file } => {
            controller.fetch_history().await?;
            controller.export_history(&file)?;
            Ok(())
        }
        CliCommand::Favorites { action } => handle_favorites(controller, action),
        CliCommand::Serve { .. } => anyhow::bail!("serve is handled before the client starts"),
    }
}

pub async fn handle_generate<S, K>(
    controller: &mut ClientController<S, K>,
    args: &GenerateArgs,
    default_length: usize,
) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    let result = controller.generate(args.to_request(default_length)).await?;

    if args.save && !controller.is_favorite(&result.password) {
        controller.toggle_favorite(&result.password)?;
    }
    if args.copy {
        controller.copy(&result.password)?;
    }
    Ok(())
}

pub async fn handle_check<S, K>(controller: &mut ClientController<S, K>, password: Option<String>) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    let password = match password {
        Some(password) => password,
        None => Password::new("Password to check:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?,
    };

    controller.check(&password).await?;
    Ok(())
}

pub fn handle_favorites<S, K>(controller: &mut ClientController<S, K>, action: FavoritesCommand) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    match action {
        FavoritesCommand::List => {
            controller.show_favorites();
        }
        FavoritesCommand::Toggle { password } => {
            controller.toggle_favorite(&password)?;
        }
        FavoritesCommand::Remove { password } => {
            controller.remove_favorite(&password)?;
        }
        FavoritesCommand::Export { file } => {
            controller.export_favorites(&file)?;
        }
    }
    Ok(())
}
