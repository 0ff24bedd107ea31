//! In-memory session history.

use std::sync::Mutex;

use crate::history::{route_from_hash, History, HistoryEntry, PopEvent};

#[derive(Debug, Clone)]
struct Slot {
    state: Option<HistoryEntry>,
    fragment: String,
}

#[derive(Debug)]
struct Session {
    slots: Vec<Slot>,
    cursor: usize,
}

/// Session history with browser semantics: push truncates forward entries.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: Mutex<Session>,
}

impl MemoryHistory {
    /// Start a session on a page loaded with URL hash `hash` (may be empty).
    pub fn new(hash: &str) -> Self {
        Self {
            inner: Mutex::new(Session {
                slots: vec![Slot {
                    state: None,
                    fragment: hash.to_string(),
                }],
                cursor: 0,
            }),
        }
    }

    fn session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.inner.lock().expect("history mutex poisoned")
    }

    /// Move back one entry, as the browser back button would.
    pub fn back(&self) -> Option<PopEvent> {
        let mut session = self.session();
        if session.cursor == 0 {
            return None;
        }
        session.cursor -= 1;
        Some(PopEvent {
            state: session.slots[session.cursor].state.clone(),
        })
    }

    /// Move forward one entry.
    pub fn forward(&self) -> Option<PopEvent> {
        let mut session = self.session();
        if session.cursor + 1 >= session.slots.len() {
            return None;
        }
        session.cursor += 1;
        Some(PopEvent {
            state: session.slots[session.cursor].state.clone(),
        })
    }

    /// State of the current entry.
    pub fn current_state(&self) -> Option<HistoryEntry> {
        let session = self.session();
        session.slots[session.cursor].state.clone()
    }

    /// The raw URL hash, including `#` when non-empty.
    pub fn hash(&self) -> String {
        let session = self.session();
        session.slots[session.cursor].fragment.clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn push_state(&self, entry: HistoryEntry, fragment: &str) {
        let mut session = self.session();
        let next = session.cursor + 1;
        session.slots.truncate(next);
        session.slots.push(Slot {
            state: Some(entry),
            fragment: fragment.to_string(),
        });
        session.cursor = next;
    }

    fn current_fragment(&self) -> Option<String> {
        route_from_hash(&self.hash())
    }

    fn len(&self) -> usize {
        self.session().slots.len()
    }
}
