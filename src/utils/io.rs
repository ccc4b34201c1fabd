// src/utils/io.rs
use std::path::PathBuf;

use directories::ProjectDirs;

pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Per-user client storage file. The directory is created on first write, and
/// the working directory is used when no home directory is known.
pub fn default_storage_file() -> PathBuf {
    match ProjectDirs::from("com", "passforge", "passforge") {
        Some(dirs) => dirs.config_dir().join(STORAGE_FILE_NAME),
        None => {
            log::warn!("Could not determine config directory, using ./{}", STORAGE_FILE_NAME);
            PathBuf::from(".").join(STORAGE_FILE_NAME)
        }
    }
}
