//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route table is usable (default route present, no duplicates)
//! - Validate the fetch base URL and log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::SiteConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site_name must not be empty")]
    EmptySiteName,

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route '{0}' has an empty path")]
    EmptyRoutePath(String),

    #[error("route '{0}' is declared more than once")]
    DuplicateRoute(String),

    #[error("default route '{0}' is not in the route table")]
    MissingDefaultRoute(String),

    #[error("fetch.base_url '{url}' is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("observability.log_level '{0}' is not a known level")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.site_name.trim().is_empty() {
        errors.push(ValidationError::EmptySiteName);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
            continue;
        }
        if route.path.trim().is_empty() {
            errors.push(ValidationError::EmptyRoutePath(route.name.clone()));
        }
        if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
    }

    if !seen.contains(config.default_route.as_str()) {
        errors.push(ValidationError::MissingDefaultRoute(config.default_route.clone()));
    }

    match Url::parse(&config.fetch.base_url) {
        Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError::InvalidBaseUrl {
            url: config.fetch.base_url.clone(),
            reason: "cannot be used as a base".to_string(),
        }),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.fetch.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
