// src/api/session.rs
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use log::debug;
use thiserror::Error;

use crate::models::HistoryEntry;

pub const DEFAULT_SESSION_LIMIT: usize = 1000;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History store lock poisoned")]
    Poisoned,
}

struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    last_seen: u64,
}

#[derive(Default)]
struct Sessions {
    by_id: HashMap<String, SessionHistory>,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .by_id
            .iter()
            .min_by_key(|(_, session)| session.last_seen)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            debug!("Evicting idle history session {}", id);
            self.by_id.remove(&id);
        }
    }
}

/// Per-session password history, newest first, capped at `limit` entries.
/// At most `session_limit` sessions are kept; the least recently used one
/// is dropped to make room for a new session.
pub struct HistoryStore {
    limit: usize,
    session_limit: usize,
    sessions: Mutex<Sessions>,
}

impl HistoryStore {
    pub fn new(limit: usize) -> Self {
        Self::with_session_limit(limit, DEFAULT_SESSION_LIMIT)
    }

    pub fn with_session_limit(limit: usize, session_limit: usize) -> Self {
        Self {
            limit,
            session_limit: session_limit.max(1),
            sessions: Mutex::new(Sessions::default()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn session_limit(&self) -> usize {
        self.session_limit
    }

    pub fn session_count(&self) -> Result<usize, HistoryError> {
        let sessions = self.sessions.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(sessions.by_id.len())
    }

    pub fn record(&self, session_id: &str, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| HistoryError::Poisoned)?;
        let now = sessions.tick();

        if !sessions.by_id.contains_key(session_id) && sessions.by_id.len() >= self.session_limit {
            sessions.evict_least_recent();
        }

        let history = sessions
            .by_id
            .entry(session_id.to_string())
            .or_insert_with(|| SessionHistory {
                entries: VecDeque::new(),
                last_seen: now,
            });
        history.last_seen = now;
        history.entries.push_front(entry);
        history.entries.truncate(self.limit);
        Ok(())
    }

    pub fn list(&self, session_id: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| HistoryError::Poisoned)?;
        let now = sessions.tick();
        Ok(sessions
            .by_id
            .get_mut(session_id)
            .map(|history| {
                history.last_seen = now;
                history.entries.iter().cloned().collect()
            })
            .unwrap_or_default())
    }

    pub fn clear(&self, session_id: &str) -> Result<(), HistoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| HistoryError::Poisoned)?;
        sessions.by_id.remove(session_id);
        Ok(())
    }
}
