//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap fragment fetches with a deadline
//! - Cancel the fetch future cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other fetch errors

use std::future::Future;
use std::time::Duration;

use crate::fetch::FetchError;

/// Run `fetch` under `limit`, or unbounded when `limit` is `None`.
pub async fn with_timeout<F>(limit: Option<Duration>, path: &str, fetch: F) -> Result<String, FetchError>
where
    F: Future<Output = Result<String, FetchError>>,
{
    let Some(limit) = limit else {
        return fetch.await;
    };

    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(path, timeout_secs = limit.as_secs(), "Fragment fetch timed out");
            Err(FetchError::Timeout {
                path: path.to_string(),
                secs: limit.as_secs(),
            })
        }
    }
}

/// Deadline from a configured number of seconds; zero disables it.
pub fn from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
