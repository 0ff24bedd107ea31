//! In-memory document.
//!
//! Models the host page as chrome navigation links (header/footer), a
//! content region whose links are re-derived on every mount, an optional
//! mobile menu and an optional year element.

use std::sync::Mutex;

use crate::dom::fragment;
use crate::dom::{ClickDelegate, ClickEvent, ClickResponse, Document, MenuState};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NavLink {
    route: String,
    active: bool,
}

impl NavLink {
    fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            active: false,
        }
    }
}

/// Which element holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Body,
    Content,
}

struct DocumentState {
    title: String,
    content: String,
    chrome_links: Vec<NavLink>,
    content_links: Vec<NavLink>,
    focus: Focus,
    mobile_menu: Option<MenuState>,
    year: Option<String>,
    delegate: Option<ClickDelegate>,
    delegate_installs: usize,
}

/// Thread-safe in-memory implementation of [`Document`].
pub struct MemoryDocument {
    inner: Mutex<DocumentState>,
}

impl MemoryDocument {
    /// Create a page whose chrome carries navigation links for `routes`.
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Mutex::new(DocumentState {
                title: String::new(),
                content: String::new(),
                chrome_links: routes.into_iter().map(NavLink::new).collect(),
                content_links: Vec::new(),
                focus: Focus::Body,
                mobile_menu: None,
                year: None,
                delegate: None,
                delegate_installs: 0,
            }),
        }
    }

    /// Add a collapsed mobile menu to the page.
    pub fn with_mobile_menu(self) -> Self {
        self.state().mobile_menu = Some(MenuState::Collapsed);
        self
    }

    /// Add an empty year element to the page.
    pub fn with_year_element(self) -> Self {
        self.state().year = Some(String::new());
        self
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state().title = title.into();
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.inner.lock().expect("document mutex poisoned")
    }

    pub fn content(&self) -> String {
        self.state().content.clone()
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn focus(&self) -> Focus {
        self.state().focus
    }

    pub fn year(&self) -> Option<String> {
        self.state().year.clone()
    }

    /// Routes of every navigation control (chrome, then content).
    pub fn link_routes(&self) -> Vec<String> {
        let state = self.state();
        state
            .chrome_links
            .iter()
            .chain(state.content_links.iter())
            .map(|l| l.route.clone())
            .collect()
    }

    /// Routes of navigation controls currently marked active.
    pub fn active_routes(&self) -> Vec<String> {
        let state = self.state();
        state
            .chrome_links
            .iter()
            .chain(state.content_links.iter())
            .filter(|l| l.active)
            .map(|l| l.route.clone())
            .collect()
    }

    /// How many times a click delegate has been installed.
    pub fn delegate_installs(&self) -> usize {
        self.state().delegate_installs
    }

    pub fn has_click_delegate(&self) -> bool {
        self.state().delegate.is_some()
    }

    /// Dispatch a click through the delegated listener.
    pub fn click(&self, event: &ClickEvent) -> ClickResponse {
        // Release the lock before the delegate runs; it calls back into us.
        let delegate = self.state().delegate.clone();
        match delegate {
            Some(delegate) => delegate(event),
            None => ClickResponse::Ignored,
        }
    }

    /// Click the first navigation control pointing at `route`.
    pub fn click_link(&self, route: &str) -> ClickResponse {
        if !self.link_routes().iter().any(|r| r == route) {
            return ClickResponse::Ignored;
        }
        self.click(&ClickEvent::on_link(route))
    }
}

impl Document for MemoryDocument {
    fn replace_content(&self, markup: &str) {
        let mut state = self.state();
        state.content = markup.to_string();
        state.content_links = fragment::nav_link_routes(markup)
            .into_iter()
            .map(NavLink::new)
            .collect();
    }

    fn clear_active_links(&self) {
        let mut state = self.state();
        let DocumentState {
            chrome_links,
            content_links,
            ..
        } = &mut *state;
        for link in chrome_links.iter_mut().chain(content_links.iter_mut()) {
            link.active = false;
        }
    }

    fn mark_active_links(&self, route: &str) {
        let mut state = self.state();
        let DocumentState {
            chrome_links,
            content_links,
            ..
        } = &mut *state;
        for link in chrome_links.iter_mut().chain(content_links.iter_mut()) {
            if link.route == route {
                link.active = true;
            }
        }
    }

    fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }

    fn focus_content(&self) {
        self.state().focus = Focus::Content;
    }

    fn mobile_menu(&self) -> Option<MenuState> {
        self.state().mobile_menu
    }

    fn set_mobile_menu(&self, menu: MenuState) {
        let mut state = self.state();
        if state.mobile_menu.is_some() {
            state.mobile_menu = Some(menu);
        }
    }

    fn set_year(&self, year: i32) -> bool {
        let mut state = self.state();
        match state.year.as_mut() {
            Some(text) => {
                *text = year.to_string();
                true
            }
            None => false,
        }
    }

    fn set_click_delegate(&self, delegate: ClickDelegate) {
        let mut state = self.state();
        state.delegate = Some(delegate);
        state.delegate_installs += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_content_links_follow_mounted_markup() {
        let doc = MemoryDocument::new(["home", "khoa-hoc"]);
        doc.replace_content(r#"<a data-link="dang-ky">x</a><a data-link="home">y</a>"#);
        assert_eq!(doc.link_routes(), vec!["home", "khoa-hoc", "dang-ky", "home"]);

        doc.replace_content("<p>none</p>");
        assert_eq!(doc.link_routes(), vec!["home", "khoa-hoc"]);
    }

    #[test]
    fn test_active_marking_is_exact() {
        let doc = MemoryDocument::new(["home", "khoa-hoc"]);
        doc.replace_content(r#"<a data-link="home">again</a>"#);

        doc.mark_active_links("khoa-hoc");
        doc.clear_active_links();
        doc.mark_active_links("home");
        assert_eq!(doc.active_routes(), vec!["home", "home"]);
    }

    #[test]
    fn test_optional_elements() {
        let bare = MemoryDocument::new(Vec::<String>::new());
        assert!(!bare.set_year(2025));
        bare.set_mobile_menu(MenuState::Expanded);
        assert_eq!(bare.mobile_menu(), None);

        let full = MemoryDocument::new(["home"]).with_year_element().with_mobile_menu();
        assert!(full.set_year(2025));
        assert_eq!(full.year().as_deref(), Some("2025"));
        assert_eq!(full.mobile_menu(), Some(MenuState::Collapsed));
    }

    #[test]
    fn test_delegate_slot_holds_one_listener() {
        let doc = MemoryDocument::new(["home"]);
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            doc.set_click_delegate(Arc::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                ClickResponse::Ignored
            }));
        }

        doc.click_link("home");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(doc.delegate_installs(), 2);
    }

    #[test]
    fn test_click_on_missing_link_is_ignored() {
        let doc = MemoryDocument::new(["home"]);
        assert!(!doc.click_link("nowhere").default_prevented());
        assert!(!doc.click_link("home").default_prevented());
    }
}
