//! Navigation state.
//!
//! The displayed route lives in three places at once: the mounted content,
//! the top history entry and the URL fragment. `NavigationState` is the only
//! writer of those facets, so a successful load updates all of them in one
//! call and a failed load updates none but the content region.

use crate::dom::{fragment, Document, MenuState};
use crate::fetch::FetchError;
use crate::history::{History, HistoryEntry};

/// A fragment fetched for a route and ready to mount.
#[derive(Debug, Clone, Copy)]
pub struct LoadedFragment<'a> {
    /// Route identifier as requested (drives links, history and URL).
    pub route: &'a str,
    /// Resolved resource path that was fetched.
    pub path: &'a str,
    pub markup: &'a str,
}

/// The route currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_route: Option<String>,
    current_path: Option<String>,
    recorded_entries: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route of the last successful load.
    pub fn current_route(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    /// Path of the last successful load.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// History entries pushed by this router.
    pub fn recorded_entries(&self) -> usize {
        self.recorded_entries
    }

    /// Mount a loaded fragment and bring every facet in line with it.
    ///
    /// Returns the page title set, if the fragment had a heading.
    pub fn apply_loaded(
        &mut self,
        loaded: LoadedFragment<'_>,
        record_history: bool,
        site_name: &str,
        document: &dyn Document,
        history: &dyn History,
    ) -> Option<String> {
        document.replace_content(loaded.markup);

        document.clear_active_links();
        document.mark_active_links(loaded.route);

        let title = fragment::first_heading(loaded.markup).map(|heading| page_title(&heading, site_name));
        if let Some(title) = &title {
            document.set_title(title);
        }

        document.focus_content();

        if record_history {
            history.push_state(HistoryEntry::new(loaded.route), &format!("#{}", loaded.route));
            self.recorded_entries += 1;
        }

        if document.mobile_menu() == Some(MenuState::Expanded) {
            document.set_mobile_menu(MenuState::Collapsed);
        }

        self.current_route = Some(loaded.route.to_string());
        self.current_path = Some(loaded.path.to_string());
        title
    }

    /// Show a load failure. History, URL, links and title stay as they were.
    pub fn apply_failed(
        &mut self,
        error: &FetchError,
        error_heading: &str,
        error_message: &str,
        document: &dyn Document,
    ) {
        document.replace_content(&error_panel(error_heading, error_message, &error.to_string()));
    }
}

pub fn page_title(heading: &str, site_name: &str) -> String {
    format!("{heading} — {site_name}")
}

/// Markup of the panel mounted when a load fails: the site's own heading
/// and message, then the failure detail.
pub fn error_panel(heading: &str, message: &str, detail: &str) -> String {
    format!(
        r#"<div class="card"><h2>{}</h2><p class="muted">{}</p><p class="muted">{}</p></div>"#,
        fragment::escape_html(heading),
        fragment::escape_html(message),
        fragment::escape_html(detail)
    )
}
