//! Fragment fetching.
//!
//! # Responsibilities
//! - Retrieve fragment markup for a resolved route path
//! - Always bypass caches (no-store)
//! - Classify failures: HTTP status, transport, body, timeout
//!
//! # Design Decisions
//! - `FragmentFetcher` is the seam; the router never sees reqwest
//! - Non-success statuses are failures, never mounted
//! - No retries: a failed load is shown and the user navigates again

pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpFetcher;
pub use memory::StaticFetcher;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Unable to load content: {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Network error loading {path}: {message}")]
    Transport { path: String, message: String },

    #[error("Unable to read content from {path}: {message}")]
    Body { path: String, message: String },

    #[error("Loading {path} timed out after {secs} seconds")]
    Timeout { path: String, secs: u64 },

    #[error("Invalid fragment URL for {path}: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "status",
            FetchError::Transport { .. } => "transport",
            FetchError::Body { .. } => "body",
            FetchError::Timeout { .. } => "timeout",
            FetchError::InvalidUrl { .. } => "invalid_url",
        }
    }
}

/// Source of fragment markup.
#[async_trait]
pub trait FragmentFetcher: Send + Sync {
    /// Fetch a fresh copy of the fragment at `path`.
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}
