//! The router/loader.
//!
//! # Responsibilities
//! - Resolve route identifiers and fetch their fragments
//! - Mount fragments and keep title, links, focus and history consistent
//! - Handle delegated navigation clicks and history pops
//! - Run fragment behaviors after each successful mount
//!
//! # Design Decisions
//! - Collaborators are injected (document, history, fetcher), never ambient
//! - Every navigation takes a ticket; only the newest ticket may mount, so
//!   a slow response can't overwrite a later navigation
//! - Failures are shown in the content region and logged, never returned
//!   as errors: the caller always gets a `NavigationOutcome`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Datelike;

use crate::behavior::BehaviorRegistry;
use crate::config::SiteConfig;
use crate::dom::{ClickEvent, ClickResponse, Document, MenuState};
use crate::fetch::{FetchError, FragmentFetcher};
use crate::history::{History, PopEvent};
use crate::observability::metrics;
use crate::resilience::timeouts;
use crate::routing::state::{LoadedFragment, NavigationState};
use crate::routing::table::RouteTable;

/// Presentation and fetch settings for a router.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Appended to every page title.
    pub site_name: String,
    /// Heading of the error panel.
    pub error_heading: String,
    /// Lead message of the error panel, above the failure detail.
    pub error_message: String,
    /// Deadline for a single fragment fetch.
    pub fetch_timeout: Option<Duration>,
}

impl RouterOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            error_heading: config.error_heading.clone(),
            error_message: config.error_message.clone(),
            fetch_timeout: timeouts::from_secs(config.fetch.timeout_secs),
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Result of one `navigate` call.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The fragment was mounted.
    Loaded {
        route: String,
        path: String,
        title: Option<String>,
        behavior_failures: usize,
    },
    /// The fetch failed; the error panel is showing.
    Failed { route: String, error: FetchError },
    /// A newer navigation started before this one finished; nothing changed.
    Superseded { route: String },
}

impl NavigationOutcome {
    pub fn route(&self) -> &str {
        match self {
            NavigationOutcome::Loaded { route, .. }
            | NavigationOutcome::Failed { route, .. }
            | NavigationOutcome::Superseded { route } => route,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, NavigationOutcome::Loaded { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Loaded { .. } => "loaded",
            NavigationOutcome::Failed { .. } => "failed",
            NavigationOutcome::Superseded { .. } => "superseded",
        }
    }
}

/// Loads route fragments into a document and keeps history in step.
pub struct Router {
    routes: Arc<RouteTable>,
    fetcher: Arc<dyn FragmentFetcher>,
    document: Arc<dyn Document>,
    history: Arc<dyn History>,
    behaviors: BehaviorRegistry,
    options: RouterOptions,
    state: Mutex<NavigationState>,
    sequence: AtomicU64,
}

impl Router {
    pub fn new(
        routes: Arc<RouteTable>,
        fetcher: Arc<dyn FragmentFetcher>,
        document: Arc<dyn Document>,
        history: Arc<dyn History>,
        options: RouterOptions,
    ) -> Self {
        Self {
            routes,
            fetcher,
            document,
            history,
            behaviors: BehaviorRegistry::new(),
            options,
            state: Mutex::new(NavigationState::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Attach the fragment behavior registry.
    pub fn with_behaviors(mut self, behaviors: BehaviorRegistry) -> Self {
        self.behaviors = behaviors;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Snapshot of the navigation state.
    pub fn state(&self) -> NavigationState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, NavigationState> {
        self.state.lock().expect("navigation state mutex poisoned")
    }

    /// Load `route` into the content region.
    ///
    /// Unknown routes load the default route's fragment and run the default
    /// route's behaviors. When `record_history` is set, a history entry is
    /// pushed and the URL fragment updated on success.
    ///
    /// Behaviors run under the navigation lock and must not call back into
    /// the router.
    pub async fn navigate(&self, route: &str, record_history: bool) -> NavigationOutcome {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.routes.resolve(route);

        if !self.routes.contains(route) {
            tracing::debug!(route, fallback = self.routes.default_route(), "Unknown route, loading default");
        }
        tracing::debug!(route, path, ticket, record_history, "Navigation started");

        let started = Instant::now();
        let result = timeouts::with_timeout(self.options.fetch_timeout, path, self.fetcher.fetch(path)).await;
        metrics::record_fetch_duration(started.elapsed());

        let outcome = {
            let mut state = self.lock_state();

            if self.sequence.load(Ordering::SeqCst) != ticket {
                tracing::debug!(route, path, ticket, "Discarding response from superseded navigation");
                NavigationOutcome::Superseded {
                    route: route.to_string(),
                }
            } else {
                match result {
                    Ok(markup) => {
                        let loaded = LoadedFragment { route, path, markup: &markup };
                        let title = state.apply_loaded(
                            loaded,
                            record_history,
                            &self.options.site_name,
                            self.document.as_ref(),
                            self.history.as_ref(),
                        );
                        // Still under the lock: a newer navigation can't mount
                        // until this fragment's behaviors are done with it.
                        let report = self.behaviors.run(self.routes.resolve_route(route), &markup);
                        drop(state);

                        tracing::info!(
                            route,
                            path,
                            title = title.as_deref().unwrap_or(""),
                            behaviors = report.completed.len(),
                            "Page loaded"
                        );

                        NavigationOutcome::Loaded {
                            route: route.to_string(),
                            path: path.to_string(),
                            title,
                            behavior_failures: report.failures.len(),
                        }
                    }
                    Err(error) => {
                        state.apply_failed(
                            &error,
                            &self.options.error_heading,
                            &self.options.error_message,
                            self.document.as_ref(),
                        );
                        tracing::error!(route, path, kind = error.kind(), error = %error, "Page load failed");

                        NavigationOutcome::Failed {
                            route: route.to_string(),
                            error,
                        }
                    }
                }
            }
        };

        metrics::record_navigation(outcome.label());
        outcome
    }

    /// Install the delegated click listener for navigation controls.
    ///
    /// Safe to call any number of times: the document holds a single
    /// delegate, so a click never triggers more than one navigation.
    /// Clicks must be dispatched from within a Tokio runtime.
    pub fn bind_navigation_handlers(self: &Arc<Self>) {
        let router = Arc::downgrade(self);

        self.document.set_click_delegate(Arc::new(move |event: &ClickEvent| {
            let Some(route) = event.route.clone().filter(|r| !r.is_empty()) else {
                return ClickResponse::Ignored;
            };
            let Some(router) = router.upgrade() else {
                return ClickResponse::Ignored;
            };

            tracing::debug!(route = %route, "Navigation link clicked");
            ClickResponse::Navigating(tokio::spawn(async move { router.navigate(&route, true).await }))
        }));

        tracing::debug!("Navigation handlers bound");
    }

    /// Replay a back/forward move without recording a new entry.
    pub async fn handle_history_pop(&self, event: &PopEvent) -> NavigationOutcome {
        let route = event
            .state
            .as_ref()
            .map(|entry| entry.route.clone())
            .or_else(|| self.history.current_fragment())
            .unwrap_or_else(|| self.routes.default_route().to_string());

        tracing::debug!(route = %route, from_state = event.state.is_some(), "History pop");
        self.navigate(&route, false).await
    }

    /// Show or hide the mobile navigation panel.
    ///
    /// Returns the new state, or `None` when the page has no mobile menu.
    pub fn toggle_mobile_menu(&self) -> Option<MenuState> {
        let Some(current) = self.document.mobile_menu() else {
            tracing::debug!("No mobile menu on this page");
            return None;
        };
        let next = current.toggled();
        self.document.set_mobile_menu(next);
        Some(next)
    }

    /// Startup sequence: year element, initial route from the URL fragment,
    /// first load without a history entry, then handler binding.
    pub async fn start(self: &Arc<Self>) -> NavigationOutcome {
        if !self.document.set_year(chrono::Local::now().year()) {
            tracing::debug!("No year element on this page");
        }

        let initial = self
            .history
            .current_fragment()
            .unwrap_or_else(|| self.routes.default_route().to_string());
        tracing::info!(route = %initial, "Router starting");

        let outcome = self.navigate(&initial, false).await;
        self.bind_navigation_handlers();
        outcome
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::fetch::StaticFetcher;
    use crate::history::MemoryHistory;

    struct Harness {
        router: Arc<Router>,
        document: Arc<MemoryDocument>,
        history: Arc<MemoryHistory>,
        fetcher: Arc<StaticFetcher>,
    }

    fn harness(fetcher: StaticFetcher, hash: &str) -> Harness {
        let routes = Arc::new(
            RouteTable::new(
                [
                    ("home", "pages/home.html"),
                    ("khoa-hoc", "pages/khoa-hoc.html"),
                    ("lien-he", "pages/lien-he.html"),
                ],
                "home",
            )
            .unwrap(),
        );
        let document = Arc::new(MemoryDocument::new(["home", "khoa-hoc", "lien-he"]).with_mobile_menu());
        let history = Arc::new(MemoryHistory::new(hash));
        let fetcher = Arc::new(fetcher);
        let options = RouterOptions {
            site_name: "Site".into(),
            error_heading: "Error".into(),
            error_message: "Unable to load content".into(),
            fetch_timeout: Some(Duration::from_secs(5)),
        };

        let router = Arc::new(Router::new(
            routes,
            fetcher.clone(),
            document.clone(),
            history.clone(),
            options,
        ));
        Harness {
            router,
            document,
            history,
            fetcher,
        }
    }

    fn pages() -> StaticFetcher {
        StaticFetcher::new()
            .page("pages/home.html", "<h1>Welcome</h1>")
            .page("pages/khoa-hoc.html", r#"<h2>Khóa học</h2><a data-link="lien-he">Liên hệ</a>"#)
            .status("pages/lien-he.html", 404, "missing")
    }

    #[tokio::test]
    async fn test_navigate_loads_and_records() {
        let h = harness(pages(), "");

        let outcome = h.router.navigate("home", true).await;

        assert!(outcome.is_loaded());
        assert_eq!(h.document.title(), "Welcome — Site");
        assert_eq!(h.document.content(), "<h1>Welcome</h1>");
        assert_eq!(h.history.hash(), "#home");
        assert_eq!(h.history.len(), 2);
        assert_eq!(h.router.state().current_route(), Some("home"));
    }

    #[tokio::test]
    async fn test_unknown_route_fetches_default() {
        let h = harness(pages(), "");

        let outcome = h.router.navigate("nonexistent", true).await;

        assert!(outcome.is_loaded());
        assert_eq!(h.fetcher.requests(), vec!["pages/home.html"]);
        assert_eq!(h.history.hash(), "#nonexistent");
    }

    #[tokio::test]
    async fn test_failure_leaves_history_and_links() {
        let h = harness(pages(), "");
        h.router.navigate("khoa-hoc", true).await;

        let outcome = h.router.navigate("lien-he", true).await;

        assert!(matches!(outcome, NavigationOutcome::Failed { error: FetchError::Status { status: 404, .. }, .. }));
        assert!(h.document.content().contains("<h2>Error</h2>"));
        assert_eq!(h.history.hash(), "#khoa-hoc");
        assert_eq!(h.history.len(), 2);
        assert_eq!(h.document.title(), "Khóa học — Site");
        assert_eq!(h.document.active_routes(), vec!["khoa-hoc"]);
    }

    #[tokio::test]
    async fn test_mobile_menu_toggles_and_closes_on_load() {
        let h = harness(pages(), "");

        assert_eq!(h.router.toggle_mobile_menu(), Some(MenuState::Expanded));
        h.router.navigate("home", false).await;
        assert_eq!(h.document.mobile_menu(), Some(MenuState::Collapsed));
        assert_eq!(h.router.toggle_mobile_menu(), Some(MenuState::Expanded));
        assert_eq!(h.router.toggle_mobile_menu(), Some(MenuState::Collapsed));
    }

    #[tokio::test]
    async fn test_pop_prefers_state_then_fragment_then_default() {
        let h = harness(pages(), "");

        h.router
            .handle_history_pop(&PopEvent {
                state: Some(crate::history::HistoryEntry::new("khoa-hoc")),
            })
            .await;
        h.router.handle_history_pop(&PopEvent::default()).await;

        assert_eq!(h.fetcher.requests(), vec!["pages/khoa-hoc.html", "pages/home.html"]);
        assert_eq!(h.history.len(), 1);
    }

    #[tokio::test]
    async fn test_start_uses_fragment_and_binds() {
        let h = harness(pages(), "#khoa-hoc");

        let outcome = h.router.start().await;

        assert_eq!(outcome.route(), "khoa-hoc");
        assert_eq!(h.history.len(), 1);
        assert!(h.document.has_click_delegate());
        assert_eq!(h.document.focus(), crate::dom::memory::Focus::Content);
    }
}
