//! In-memory fragment source.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::{FetchError, FragmentFetcher};

#[derive(Debug, Clone)]
enum Reply {
    Page { status: u16, body: String },
    NetworkError(String),
}

#[derive(Debug, Clone)]
struct Resource {
    reply: Reply,
    delay: Duration,
}

/// Serves fragments from a fixed map and records every requested path.
///
/// Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    resources: HashMap<String, Resource>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `path`.
    pub fn page(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.status(path, 200, body)
    }

    /// Serve `body` with an arbitrary status at `path`.
    pub fn status(mut self, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.resources.insert(
            path.into(),
            Resource {
                reply: Reply::Page {
                    status,
                    body: body.into(),
                },
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Fail requests for `path` as if the network were down.
    pub fn network_error(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.resources.insert(
            path.into(),
            Resource {
                reply: Reply::NetworkError(message.into()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Hold the reply for `path` for `delay` before answering.
    pub fn delayed(mut self, path: &str, delay: Duration) -> Self {
        if let Some(resource) = self.resources.get_mut(path) {
            resource.delay = delay;
        }
        self
    }

    /// Every path requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log mutex poisoned").clone()
    }
}

#[async_trait]
impl FragmentFetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .push(path.to_string());

        let Some(resource) = self.resources.get(path).cloned() else {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            });
        };

        if !resource.delay.is_zero() {
            tokio::time::sleep(resource.delay).await;
        }

        match resource.reply {
            Reply::Page { status, body } if (200..300).contains(&status) => Ok(body),
            Reply::Page { status, .. } => Err(FetchError::Status {
                path: path.to_string(),
                status,
            }),
            Reply::NetworkError(message) => Err(FetchError::Transport {
                path: path.to_string(),
                message,
            }),
        }
    }
}
