//! Navigation history contract.
//!
//! # Data Flow
//! ```text
//! Router (recorded navigation)
//!     → History::push_state(HistoryEntry { route }, "#route")
//!
//! Back / forward
//!     → PopEvent { state }
//!     → Router::handle_history_pop (state, else URL fragment, else default)
//! ```
//!
//! # Design Decisions
//! - Entries carry the route, so replay never has to re-parse the URL
//! - The URL fragment stays the bookmarkable form of the current route

pub mod memory;

use serde::{Deserialize, Serialize};

pub use memory::MemoryHistory;

/// Record pushed for each recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub route: String,
}

impl HistoryEntry {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

/// Delivered when the user moves back or forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopEvent {
    /// State recorded with the entry that is now current, if any.
    pub state: Option<HistoryEntry>,
}

/// Operations the router performs on the session history and URL.
pub trait History: Send + Sync {
    /// Push a new entry and point the URL fragment at `fragment`.
    fn push_state(&self, entry: HistoryEntry, fragment: &str);

    /// The URL fragment without its leading `#`, or `None` when empty.
    fn current_fragment(&self) -> Option<String>;

    /// Number of entries in the session history.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Route named by a raw `location.hash` value.
pub fn route_from_hash(hash: &str) -> Option<String> {
    let route = hash.replacen('#', "", 1);
    if route.is_empty() {
        None
    } else {
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_hash() {
        assert_eq!(route_from_hash("#khoa-hoc").as_deref(), Some("khoa-hoc"));
        assert_eq!(route_from_hash("khoa-hoc").as_deref(), Some("khoa-hoc"));
        assert_eq!(route_from_hash("#"), None);
        assert_eq!(route_from_hash(""), None);
    }

    #[test]
    fn test_entry_serializes_as_route_object() {
        let json = serde_json::to_string(&HistoryEntry::new("home")).unwrap();
        assert_eq!(json, r#"{"route":"home"}"#);
    }
}
