// src/client/favorites.rs
use std::collections::BTreeSet;

use log::{info, warn};

use super::storage::{KeyValueStore, StorageError};

/// Storage key holding the favorites as a JSON array of strings
pub const FAVORITES_KEY: &str = "savedPasswords";

/// Passwords the user chose to keep, written through to durable storage on
/// every change
#[derive(Debug)]
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    passwords: Vec<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites from storage; a missing or unreadable value is an empty set
    pub fn load(storage: S) -> Self {
        let passwords = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(mut passwords) => {
                    let mut seen = BTreeSet::new();
                    passwords.retain(|p| seen.insert(p.clone()));
                    passwords
                }
                Err(e) => {
                    warn!("⚠️ Ignoring malformed {}: {}", FAVORITES_KEY, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("⚠️ Could not read {}: {}", FAVORITES_KEY, e);
                Vec::new()
            }
        };

        Self { storage, passwords }
    }

    pub fn is_favorite(&self, password: &str) -> bool {
        self.passwords.iter().any(|p| p == password)
    }

    /// Add the password if absent, remove it if present. Returns whether it is
    /// a favorite afterwards.
    pub fn toggle(&mut self, password: &str) -> Result<bool, StorageError> {
        if self.is_favorite(password) {
            self.remove(password)?;
            Ok(false)
        } else {
            self.passwords.push(password.to_string());
            if let Err(e) = self.persist() {
                self.passwords.pop();
                return Err(e);
            }
            info!("⭐ Saved password to favorites ({} total)", self.passwords.len());
            Ok(true)
        }
    }

    /// Returns whether the password was a favorite
    pub fn remove(&mut self, password: &str) -> Result<bool, StorageError> {
        let Some(index) = self.passwords.iter().position(|p| p == password) else {
            return Ok(false);
        };

        let removed = self.passwords.remove(index);
        if let Err(e) = self.persist() {
            self.passwords.insert(index, removed);
            return Err(e);
        }
        info!("🗑️ Removed password from favorites ({} left)", self.passwords.len());
        Ok(true)
    }

    pub fn list(&self) -> BTreeSet<String> {
        self.passwords.iter().cloned().collect()
    }

    /// Favorites in the order they were added
    pub fn passwords(&self) -> &[String] {
        &self.passwords
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.passwords)?;
        self.storage.set(FAVORITES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::{FileStore, MemoryStore};

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut favorites = FavoritesStore::load(MemoryStore::new());
        favorites.toggle("keep-me").unwrap();
        let before = favorites.list();

        assert!(favorites.toggle("Tr0ub4dor&3").unwrap());
        assert!(favorites.is_favorite("Tr0ub4dor&3"));
        assert!(!favorites.toggle("Tr0ub4dor&3").unwrap());

        assert_eq!(favorites.list(), before);
    }

    #[test]
    fn remove_reports_membership() {
        let mut favorites = FavoritesStore::load(MemoryStore::new());
        favorites.toggle("a").unwrap();
        assert!(favorites.remove("a").unwrap());
        assert!(!favorites.remove("a").unwrap());
        assert!(favorites.is_empty());
    }

    #[test]
    fn persisted_favorites_reload_as_same_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut favorites = FavoritesStore::load(FileStore::open(&path).unwrap());
        for password in ["zeta", "alpha", "mid"] {
            favorites.toggle(password).unwrap();
        }
        let saved = favorites.list();
        drop(favorites);

        let reloaded = FavoritesStore::load(FileStore::open(&path).unwrap());
        assert_eq!(reloaded.list(), saved);
    }

    #[test]
    fn stored_value_is_a_json_array() {
        let mut favorites = FavoritesStore::load(MemoryStore::new());
        favorites.toggle("one").unwrap();
        favorites.toggle("two").unwrap();

        let storage = favorites.into_storage();
        let raw = storage.get(FAVORITES_KEY).unwrap().unwrap();
        let stored: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec!["one", "two"]);
    }

    #[test]
    fn malformed_value_loads_empty() {
        let mut storage = MemoryStore::new();
        storage.set(FAVORITES_KEY, "{\"not\": \"an array\"}").unwrap();
        let favorites = FavoritesStore::load(storage);
        assert!(favorites.is_empty());
    }
}
