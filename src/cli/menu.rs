// src/cli/menu.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::client::controller::{CURRENT_EXPORT_FILENAME, FAVORITES_EXPORT_FILENAME, SESSION_EXPORT_FILENAME};
use crate::client::{ClientController, KeyValueStore, PasswordService};
use crate::core::config::Config;
use crate::generators::DEFAULT_PATTERN;
use crate::models::{GenerationMethod, GenerationRequest};

const GENERATE: &str = "🔐  Generate password";
const CHECK: &str = "🔍  Check password strength";
const TOGGLE_VISIBILITY: &str = "👁️  Show/hide current password";
const COPY: &str = "📋  Copy current password";
const FAVORITE: &str = "⭐  Save/unsave current password";
const HISTORY: &str = "🕘  View history";
const CLEAR_HISTORY: &str = "🧹  Clear history";
const SAVED: &str = "📚  Saved passwords";
const EXPORT_CURRENT: &str = "📤  Export current password";
const EXPORT_SESSION: &str = "📤  Export session passwords";
const EXPORT_SAVED: &str = "📤  Export saved passwords";
const EXIT: &str = "❌  Exit";

const BACK: &str = "⬅️  Back";

pub async fn run_cli_menu<S, K>(
    controller: &mut ClientController<S, K>,
    config: &Config,
    should_exit: Arc<AtomicBool>,
) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    println!("🔐 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║             🔐 PASSFORGE             ║");
    println!("╚══════════════════════════════════════╝");
    println!("Password service: {}", config.server_url);

    let mut last_request: Option<GenerationRequest> = None;

    while !should_exit.load(Ordering::SeqCst) {
        let options = vec![
            GENERATE,
            CHECK,
            TOGGLE_VISIBILITY,
            COPY,
            FAVORITE,
            HISTORY,
            CLEAR_HISTORY,
            SAVED,
            EXPORT_CURRENT,
            EXPORT_SESSION,
            EXPORT_SAVED,
            EXIT,
        ];

        let selection_result = tokio::task::spawn_blocking(move || {
            Select::new("Choose an option:", options)
                .with_help_message("Use arrow keys to navigate, Enter to select. Ctrl+C to exit.")
                .with_page_size(15)
                .prompt_skippable()
        })
        .await?;

        if should_exit.load(Ordering::SeqCst) {
            break;
        }

        match selection_result {
            Ok(Some(choice)) => {
                if let Err(e) = run_action(controller, config, &mut last_request, choice, &should_exit).await {
                    match prompt_failure(&e) {
                        PromptFailure::Interrupted => break,
                        PromptFailure::Cancelled => println!("ℹ️ Cancelled"),
                        PromptFailure::Other => println!("⚠️ {}", e),
                    }
                }
            }
            Ok(None) => {
                if should_exit.load(Ordering::SeqCst) {
                    break;
                }
                // Avoid spinning while waiting for input
                thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum PromptFailure {
    Interrupted,
    Cancelled,
    Other,
}

// Only Ctrl+C ends the menu; anything else returns to it
fn prompt_failure(error: &anyhow::Error) -> PromptFailure {
    match error.downcast_ref::<InquireError>() {
        Some(InquireError::OperationInterrupted) => PromptFailure::Interrupted,
        Some(InquireError::OperationCanceled) => PromptFailure::Cancelled,
        _ => PromptFailure::Other,
    }
}

// Failed controller operations were already rendered by the view
async fn run_action<S, K>(
    controller: &mut ClientController<S, K>,
    config: &Config,
    last_request: &mut Option<GenerationRequest>,
    choice: &str,
    should_exit: &AtomicBool,
) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    match choice {
        GENERATE => {
            let request = prompt_generation_options(config, last_request.as_ref())?;
            *last_request = Some(request.clone());
            let _ = controller.generate(request).await;
        }
        CHECK => {
            let password = Password::new("Password to check:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt()?;
            let _ = controller.check(&password).await;
        }
        TOGGLE_VISIBILITY => {
            if controller.display().password().is_some() {
                controller.toggle_visibility();
            } else {
                println!("ℹ️ Generate a password first");
            }
        }
        COPY => {
            let _ = controller.copy_current();
        }
        FAVORITE => {
            let _ = controller.toggle_favorite_current();
        }
        HISTORY => {
            let _ = controller.fetch_history().await;
        }
        CLEAR_HISTORY => {
            let confirm = Confirm::new("Clear your password history?")
                .with_default(false)
                .prompt()?;
            if confirm {
                controller.clear_history().await;
            }
        }
        SAVED => manage_saved_passwords(controller)?,
        EXPORT_CURRENT => {
            let file = prompt_filename(CURRENT_EXPORT_FILENAME)?;
            let _ = controller.export_current(&file);
        }
        EXPORT_SESSION => {
            let file = prompt_filename(SESSION_EXPORT_FILENAME)?;
            let _ = controller.export_session(&file);
        }
        EXPORT_SAVED => {
            let file = prompt_filename(FAVORITES_EXPORT_FILENAME)?;
            let _ = controller.export_favorites(&file);
        }
        EXIT => {
            println!("👋 Shutting down passforge...");
            should_exit.store(true, Ordering::SeqCst);
        }
        _ => {}
    }
    Ok(())
}

fn prompt_generation_options(config: &Config, previous: Option<&GenerationRequest>) -> Result<GenerationRequest> {
    if let Some(previous) = previous {
        let reuse = Confirm::new("Use the previous options?")
            .with_default(true)
            .prompt()?;
        if reuse {
            return Ok(previous.clone());
        }
    }

    let default_length = previous
        .map(|request| request.length)
        .unwrap_or(config.default_password_length);

    let length = CustomType::<usize>::new("Password length:")
        .with_default(default_length)
        .with_help_message("Between 6 and 128 characters")
        .with_error_message("Please type a whole number")
        .prompt()?;

    let method = Select::new("Generation method:", GenerationMethod::ALL.to_vec()).prompt()?;

    let pattern = if method == GenerationMethod::Pattern {
        let pattern = Text::new("Pattern:")
            .with_default(DEFAULT_PATTERN)
            .with_help_message("A adjective, N noun, V verb, C/c letter, D digit, S symbol")
            .prompt()?;
        Some(pattern).filter(|p| !p.trim().is_empty())
    } else {
        None
    };

    let uppercase = Confirm::new("Include uppercase letters?")
        .with_default(true)
        .prompt()?;

    let lowercase = Confirm::new("Include lowercase letters?")
        .with_default(true)
        .prompt()?;

    let digits = Confirm::new("Include digits?")
        .with_default(true)
        .prompt()?;

    let symbols = Confirm::new("Include symbols?")
        .with_default(true)
        .prompt()?;

    let exclude_similar = Confirm::new("Exclude similar characters (like i, l, 1, L, o, 0, O)?")
        .with_default(false)
        .prompt()?;

    let exclude_ambiguous = Confirm::new("Exclude ambiguous symbols (brackets, quotes, punctuation)?")
        .with_default(false)
        .prompt()?;

    Ok(GenerationRequest {
        length,
        uppercase,
        lowercase,
        digits,
        symbols,
        method,
        pattern,
        exclude_similar,
        exclude_ambiguous,
    })
}

fn prompt_filename(default: &str) -> Result<String> {
    Ok(Text::new("File name:").with_default(default).prompt()?)
}

fn manage_saved_passwords<S, K>(controller: &mut ClientController<S, K>) -> Result<()>
where
    S: PasswordService,
    K: KeyValueStore,
{
    loop {
        let saved = controller.favorites().passwords().to_vec();
        if saved.is_empty() {
            controller.show_favorites();
            return Ok(());
        }

        let mut choices: Vec<String> = saved;
        choices.push(BACK.to_string());

        let selected = Select::new("Select a saved password:", choices)
            .with_page_size(15)
            .prompt()?;
        if selected == BACK {
            return Ok(());
        }

        let action = Select::new("What would you like to do?", vec!["📋  Copy", "🗑️  Remove", BACK]).prompt()?;
        match action {
            "📋  Copy" => {
                let _ = controller.copy(&selected);
            }
            "🗑️  Remove" => {
                let confirm = Confirm::new("Remove this saved password?")
                    .with_default(false)
                    .prompt()?;
                if confirm {
                    let _ = controller.remove_favorite(&selected);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_interrupt_leaves_the_menu() {
        let interrupted = anyhow::Error::new(InquireError::OperationInterrupted);
        let cancelled = anyhow::Error::new(InquireError::OperationCanceled);
        let bad_input = anyhow::Error::new(InquireError::Custom("Invalid number".into()));
        let export = anyhow::anyhow!("disk full");

        assert_eq!(prompt_failure(&interrupted), PromptFailure::Interrupted);
        assert_eq!(prompt_failure(&cancelled), PromptFailure::Cancelled);
        assert_eq!(prompt_failure(&bad_input), PromptFailure::Other);
        assert_eq!(prompt_failure(&export), PromptFailure::Other);
    }
}
