//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name appended to every page title.
    pub site_name: String,

    /// Route loaded when the requested identifier is unknown or absent.
    pub default_route: String,

    /// Heading shown in the error panel when a fragment fails to load.
    pub error_heading: String,

    /// Message shown under the error heading, before the failure detail.
    pub error_message: String,

    /// Route identifier to fragment path mappings, in navigation order.
    pub routes: Vec<RouteConfig>,

    /// Fragment fetching settings.
    pub fetch: FetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Trung Tâm Thành Công".to_string(),
            default_route: "home".to_string(),
            error_heading: "Đã có lỗi".to_string(),
            error_message: "Không thể tải nội dung".to_string(),
            routes: default_routes(),
            fetch: FetchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A single route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier, as carried by `data-link` and the URL fragment.
    pub name: String,

    /// Fragment resource path, relative to the fetch base URL.
    pub path: String,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

fn default_routes() -> Vec<RouteConfig> {
    [
        "home",
        "gioi-thieu",
        "khoa-hoc",
        "lich-khai-giang",
        "tin-tuc",
        "cam-nhan",
        "dang-ky",
        "lien-he",
    ]
    .into_iter()
    .map(|name| RouteConfig::new(name, format!("thanhcong-edu/pages/{name}.html")))
    .collect()
}

/// Fragment fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL that fragment paths are resolved against.
    pub base_url: String,

    /// Per-fetch deadline in seconds (0 disables the deadline).
    pub timeout_secs: u64,

    /// User-Agent header sent with fragment requests.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 30,
            user_agent: format!("site-router/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
