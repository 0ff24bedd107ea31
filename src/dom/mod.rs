//! Host document contract.
//!
//! # Data Flow
//! ```text
//! Router
//!     → Document (content mount, title, focus, nav links, mobile menu)
//!     ← ClickDelegate (one delegated listener, matched by `data-link`)
//! ```
//!
//! # Design Decisions
//! - The router never touches ambient globals; the host page is injected
//! - Clicks are delegated: one listener, nav controls matched at dispatch
//! - `MemoryDocument` backs tests and the CLI; a browser host supplies its own

pub mod fragment;
pub mod memory;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::routing::NavigationOutcome;

pub use memory::MemoryDocument;

/// Attribute naming the route a navigation control points at.
pub const ROUTE_ATTRIBUTE: &str = "data-link";

/// Visibility of the mobile navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Expanded,
    Collapsed,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Expanded => MenuState::Collapsed,
            MenuState::Collapsed => MenuState::Expanded,
        }
    }
}

/// A click delivered to the document.
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Value of the target's route attribute, if it carries one.
    pub route: Option<String>,
}

impl ClickEvent {
    pub fn on_link(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
        }
    }
}

/// What the delegated listener did with a click.
#[derive(Debug)]
pub enum ClickResponse {
    /// Not a navigation control; the default action proceeds.
    Ignored,
    /// Default prevented; a navigation is running.
    Navigating(JoinHandle<NavigationOutcome>),
}

impl ClickResponse {
    pub fn default_prevented(&self) -> bool {
        matches!(self, ClickResponse::Navigating(_))
    }
}

pub type ClickDelegate = Arc<dyn Fn(&ClickEvent) -> ClickResponse + Send + Sync>;

/// Operations the router performs on the host page.
pub trait Document: Send + Sync {
    /// Replace the content region's markup verbatim.
    fn replace_content(&self, markup: &str);

    /// Remove the active marker from every navigation control.
    fn clear_active_links(&self);

    /// Mark every navigation control whose route equals `route` as active.
    fn mark_active_links(&self, route: &str);

    fn set_title(&self, title: &str);

    fn focus_content(&self);

    /// Current mobile menu state, or `None` when the page has no menu.
    fn mobile_menu(&self) -> Option<MenuState>;

    fn set_mobile_menu(&self, state: MenuState);

    /// Write the year into the year element. Returns false if there is none.
    fn set_year(&self, year: i32) -> bool;

    /// Install the single delegated click listener, replacing any previous one.
    fn set_click_delegate(&self, delegate: ClickDelegate);
}
