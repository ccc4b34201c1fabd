// src/client/mod.rs
//
// Typed client for the password service. `ClientController` owns the session
// state and reports every change to its observers; the terminal view in
// `crate::cli` only renders those events.
use thiserror::Error;

pub mod clipboard;
pub mod controller;
pub mod display;
pub mod events;
pub mod export;
pub mod favorites;
pub mod service;
pub mod storage;

pub use controller::ClientController;
pub use display::PasswordDisplay;
pub use events::{ControllerEvent, ControllerObserver};
pub use export::{ExportError, ExportOutcome, Exporter};
pub use favorites::FavoritesStore;
pub use service::{HttpPasswordService, PasswordService};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Please enter a password to check")]
    EmptyPassword,

    #[error("No password has been generated yet")]
    NoCurrentPassword,
}

pub type Result<T> = std::result::Result<T, ClientError>;
