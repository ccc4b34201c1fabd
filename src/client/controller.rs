// src/client/controller.rs
use log::{error, info, warn};

use super::clipboard::{ClipboardSink, SystemClipboard};
use super::display::PasswordDisplay;
use super::events::{ControllerEvent, ControllerObserver};
use super::export::{ExportOutcome, Exporter};
use super::favorites::FavoritesStore;
use super::service::PasswordService;
use super::storage::KeyValueStore;
use super::{ClientError, Result};
use crate::api::types::{CheckResult, GenerationResult};
use crate::models::{GenerationRequest, HistoryEntry};

pub const SESSION_EXPORT_FILENAME: &str = "passwords_session.txt";
pub const FAVORITES_EXPORT_FILENAME: &str = "passwords_saved.txt";
pub const CURRENT_EXPORT_FILENAME: &str = "password.txt";
pub const HISTORY_EXPORT_FILENAME: &str = "passwords_history.txt";

/// Client session state: the current password, the history cache, the
/// passwords generated this session and the favorites. Views subscribe to it
/// and render from the events it emits.
pub struct ClientController<S: PasswordService, K: KeyValueStore> {
    service: S,
    favorites: FavoritesStore<K>,
    exporter: Exporter,
    clipboard: Box<dyn ClipboardSink>,
    display: PasswordDisplay,
    current: Option<GenerationResult>,
    history: Vec<HistoryEntry>,
    session_passwords: Vec<String>,
    observers: Vec<Box<dyn ControllerObserver>>,
}

impl<S: PasswordService, K: KeyValueStore> ClientController<S, K> {
    pub fn new(service: S, favorites: FavoritesStore<K>, exporter: Exporter) -> Self {
        Self {
            service,
            favorites,
            exporter,
            clipboard: Box::new(SystemClipboard),
            display: PasswordDisplay::new(),
            current: None,
            history: Vec::new(),
            session_passwords: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn subscribe(&mut self, observer: impl ControllerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: ControllerEvent) {
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    fn report(&mut self, context: &str, err: &ClientError) {
        error!("❌ {}: {}", context, err);
        self.emit(ControllerEvent::Error(format!("{}: {}", context, err)));
    }

    fn warn_user(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("⚠️ {}", message);
        self.emit(ControllerEvent::Warning(message));
    }

    fn emit_display(&mut self) {
        let event = ControllerEvent::DisplayChanged {
            text: self.display.render(),
            hidden: self.display.is_hidden(),
        };
        self.emit(event);
    }

    fn emit_favorites(&mut self) {
        let passwords = self.favorites.passwords().to_vec();
        self.emit(ControllerEvent::FavoritesChanged(passwords));
    }

    // Network operations

    pub async fn generate(&mut self, request: GenerationRequest) -> Result<GenerationResult> {
        if !request.has_character_class() {
            self.warn_user("No character types selected, using lowercase letters");
        }
        let request = request.normalized();

        let result = match self.service.generate(&request).await {
            Ok(result) => result,
            Err(e) => {
                self.report("Failed to generate password", &e);
                return Err(e);
            }
        };

        info!(
            "🔐 Generated {}-character password (score {}/4)",
            result.password.chars().count(),
            result.score
        );

        self.display.set(result.password.clone());
        if !self.session_passwords.contains(&result.password) {
            self.session_passwords.push(result.password.clone());
        }
        self.current = Some(result.clone());

        self.emit(ControllerEvent::PasswordGenerated(result.clone()));
        self.emit_display();

        // Already reported through the error event
        let _ = self.fetch_history().await;

        Ok(result)
    }

    pub async fn check(&mut self, password: &str) -> Result<CheckResult> {
        if password.is_empty() {
            let err = ClientError::EmptyPassword;
            self.warn_user(err.to_string());
            return Err(err);
        }

        match self.service.check(password).await {
            Ok(result) => {
                info!("🔍 Checked password strength: {} ({}/4)", result.strength, result.score);
                self.emit(ControllerEvent::PasswordChecked(result.clone()));
                Ok(result)
            }
            Err(e) => {
                self.report("Failed to check password", &e);
                Err(e)
            }
        }
    }

    pub async fn fetch_history(&mut self) -> Result<Vec<HistoryEntry>> {
        match self.service.history().await {
            Ok(history) => {
                self.history = history.clone();
                self.emit(ControllerEvent::HistoryUpdated(history.clone()));
                Ok(history)
            }
            Err(e) => {
                self.report("Failed to load password history", &e);
                Err(e)
            }
        }
    }

    /// Clear the local history right away, then ask the server. Returns whether
    /// the server acknowledged; the local history stays cleared either way.
    pub async fn clear_history(&mut self) -> bool {
        self.history.clear();
        self.emit(ControllerEvent::HistoryUpdated(Vec::new()));

        let server_acknowledged = match self.service.clear_history().await {
            Ok(()) => {
                info!("🧹 Password history cleared");
                true
            }
            Err(e) => {
                warn!("⚠️ History cleared locally, server clear failed: {}", e);
                false
            }
        };

        self.emit(ControllerEvent::HistoryCleared { server_acknowledged });
        server_acknowledged
    }

    // Local operations

    /// Switch the current password between plain and masked; returns the new
    /// hidden state
    pub fn toggle_visibility(&mut self) -> bool {
        let hidden = self.display.toggle();
        self.emit_display();
        hidden
    }

    pub fn copy_current(&mut self) -> Result<()> {
        let Some(password) = self.display.password().map(str::to_string) else {
            let err = ClientError::NoCurrentPassword;
            self.warn_user(err.to_string());
            return Err(err);
        };
        self.copy(&password)
    }

    pub fn copy(&mut self, password: &str) -> Result<()> {
        match self.clipboard.copy(password) {
            Ok(()) => {
                self.emit(ControllerEvent::Copied);
                Ok(())
            }
            Err(e) => {
                self.report("Failed to copy to clipboard", &e);
                Err(e)
            }
        }
    }

    /// Returns whether the password is a favorite afterwards
    pub fn toggle_favorite(&mut self, password: &str) -> Result<bool> {
        match self.favorites.toggle(password) {
            Ok(saved) => {
                self.emit_favorites();
                Ok(saved)
            }
            Err(e) => {
                let err = ClientError::from(e);
                self.report("Failed to save favorites", &err);
                Err(err)
            }
        }
    }

    pub fn toggle_favorite_current(&mut self) -> Result<bool> {
        let Some(password) = self.display.password().map(str::to_string) else {
            let err = ClientError::NoCurrentPassword;
            self.warn_user(err.to_string());
            return Err(err);
        };
        self.toggle_favorite(&password)
    }

    pub fn remove_favorite(&mut self, password: &str) -> Result<bool> {
        match self.favorites.remove(password) {
            Ok(removed) => {
                if removed {
                    self.emit_favorites();
                } else {
                    self.warn_user("That password is not saved");
                }
                Ok(removed)
            }
            Err(e) => {
                let err = ClientError::from(e);
                self.report("Failed to save favorites", &err);
                Err(err)
            }
        }
    }

    /// Announce the saved passwords to the view
    pub fn show_favorites(&mut self) {
        self.emit_favorites();
    }

    pub fn export_session(&mut self, filename: &str) -> Result<ExportOutcome> {
        let passwords = self.session_passwords.clone();
        self.export(&passwords, filename, "No session passwords to export")
    }

    pub fn export_favorites(&mut self, filename: &str) -> Result<ExportOutcome> {
        let passwords = self.favorites.passwords().to_vec();
        self.export(&passwords, filename, "No saved passwords to export")
    }

    /// Export the cached server history, newest first
    pub fn export_history(&mut self, filename: &str) -> Result<ExportOutcome> {
        let passwords: Vec<String> = self.history.iter().map(|entry| entry.password.clone()).collect();
        self.export(&passwords, filename, "No history passwords to export")
    }

    pub fn export_current(&mut self, filename: &str) -> Result<ExportOutcome> {
        let passwords: Vec<String> = self.display.password().map(str::to_string).into_iter().collect();
        self.export(&passwords, filename, "No passwords to export")
    }

    fn export(&mut self, passwords: &[String], filename: &str, empty_message: &str) -> Result<ExportOutcome> {
        match self.exporter.export_as_file(passwords, filename) {
            Ok(ExportOutcome::Empty) => {
                self.warn_user(empty_message);
                Ok(ExportOutcome::Empty)
            }
            Ok(ExportOutcome::Written { path, count }) => {
                self.emit(ControllerEvent::Exported {
                    path: path.clone(),
                    count,
                });
                Ok(ExportOutcome::Written { path, count })
            }
            Err(e) => {
                let err = ClientError::from(e);
                self.report("Failed to export passwords", &err);
                Err(err)
            }
        }
    }

    // Accessors

    pub fn current(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    pub fn display(&self) -> &PasswordDisplay {
        &self.display
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn session_passwords(&self) -> &[String] {
        &self.session_passwords
    }

    pub fn favorites(&self) -> &FavoritesStore<K> {
        &self.favorites
    }

    pub fn is_favorite(&self, password: &str) -> bool {
        self.favorites.is_favorite(password)
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
