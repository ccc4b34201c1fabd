// src/client/events.rs
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::api::types::{CheckResult, GenerationResult};
use crate::models::HistoryEntry;

/// Everything the controller reports to the view layer
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    PasswordGenerated(GenerationResult),
    PasswordChecked(CheckResult),
    DisplayChanged { text: String, hidden: bool },
    HistoryUpdated(Vec<HistoryEntry>),
    HistoryCleared { server_acknowledged: bool },
    FavoritesChanged(Vec<String>),
    Copied,
    Exported { path: PathBuf, count: usize },
    Warning(String),
    Error(String),
}

pub trait ControllerObserver {
    fn notify(&mut self, event: &ControllerEvent);
}

impl<T: ControllerObserver> ControllerObserver for Rc<RefCell<T>> {
    fn notify(&mut self, event: &ControllerEvent) {
        self.borrow_mut().notify(event);
    }
}

/// Keeps every event, for tests and scripted front ends
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ControllerEvent>,
}

impl ControllerObserver for EventLog {
    fn notify(&mut self, event: &ControllerEvent) {
        self.events.push(event.clone());
    }
}
