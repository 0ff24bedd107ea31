//! HTTP fragment fetcher.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA, USER_AGENT};
use url::Url;

use crate::config::FetchConfig;
use crate::fetch::{FetchError, FragmentFetcher};

/// Fetches fragments over HTTP relative to a base URL, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: Url, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!(user_agent, "Ignoring invalid User-Agent");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .no_proxy()
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build a fetcher from validated fetch configuration.
    pub fn from_config(config: &FetchConfig) -> Result<Self, HttpFetcherError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self::new(base_url, &config.user_agent)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|source| FetchError::InvalidUrl {
            path: path.to_string(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpFetcherError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[async_trait]
impl FragmentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path)?;
        tracing::debug!(url = %url, "Fetching fragment");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
