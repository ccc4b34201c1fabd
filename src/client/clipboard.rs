// src/client/clipboard.rs
use arboard::Clipboard;

use super::{ClientError, Result};

/// Destination for "copy to clipboard"
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard. A fresh handle is opened per copy so that headless
/// sessions only fail when a copy is actually requested.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| ClientError::Clipboard(format!("Clipboard unavailable: {e}")))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClientError::Clipboard(format!("Failed to set clipboard: {e}")))?;
        Ok(())
    }
}
