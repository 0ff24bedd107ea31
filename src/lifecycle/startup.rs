//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a route table and router
//! - Build the HTTP fetcher for the configured base URL
//! - Wire host-supplied document and history adapters
//!
//! # Design Decisions
//! - Fail fast: a bad route table or base URL is fatal at startup
//! - The router itself performs the first load (`Router::start`)

use std::sync::Arc;

use thiserror::Error;

use crate::behavior::BehaviorRegistry;
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::fetch::http::HttpFetcherError;
use crate::fetch::{FragmentFetcher, HttpFetcher};
use crate::history::History;
use crate::routing::{RouteTable, RouteTableError, Router, RouterOptions};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("fetcher: {0}")]
    Fetcher(#[from] HttpFetcherError),
}

/// Build a router for `config` that fetches fragments over HTTP.
pub fn build_router(
    config: &SiteConfig,
    document: Arc<dyn Document>,
    history: Arc<dyn History>,
    behaviors: BehaviorRegistry,
) -> Result<Arc<Router>, StartupError> {
    let fetcher = HttpFetcher::from_config(&config.fetch)?;
    tracing::info!(base_url = %fetcher.base_url(), "Fragment fetcher ready");
    build_router_with(config, Arc::new(fetcher), document, history, behaviors)
}

/// Build a router for `config` around an arbitrary fragment source.
pub fn build_router_with(
    config: &SiteConfig,
    fetcher: Arc<dyn FragmentFetcher>,
    document: Arc<dyn Document>,
    history: Arc<dyn History>,
    behaviors: BehaviorRegistry,
) -> Result<Arc<Router>, StartupError> {
    let routes = Arc::new(RouteTable::from_config(config)?);

    tracing::info!(
        site = %config.site_name,
        routes = routes.len(),
        default_route = routes.default_route(),
        fetch_timeout_secs = config.fetch.timeout_secs,
        "Route table compiled"
    );

    let router = Router::new(
        routes,
        fetcher,
        document,
        history,
        RouterOptions::from_config(config),
    )
    .with_behaviors(behaviors);

    Ok(Arc::new(router))
}
