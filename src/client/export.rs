// src/client/export.rs
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::info;
use thiserror::Error;

pub const DEFAULT_EXPORT_FILENAME: &str = "passwords.txt";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, count: usize },
    /// Nothing to export, no file was created
    Empty,
}

/// Writes password lists as plain text files, one password per line
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn export_as_file(&self, passwords: &[String], filename: &str) -> Result<ExportOutcome, ExportError> {
        if passwords.is_empty() {
            return Ok(ExportOutcome::Empty);
        }

        let filename = validate_filename(filename)?;
        fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(filename);
        fs::write(&path, passwords.join("\n"))?;

        info!("📤 Exported {} passwords to {}", passwords.len(), path.display());
        Ok(ExportOutcome::Written {
            path,
            count: passwords.len(),
        })
    }
}

// A bare file name: no directories, no parent references
fn validate_filename(filename: &str) -> Result<&str, ExportError> {
    let trimmed = filename.trim();
    let mut components = Path::new(trimmed).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(trimmed),
        _ => Err(ExportError::InvalidFilename(filename.to_string())),
    }
}
