//! Route table lookup.
//!
//! # Responsibilities
//! - Store route identifier → fragment path pairs
//! - Resolve identifiers, falling back to the default route
//!
//! # Design Decisions
//! - Immutable after construction (shareable without locks)
//! - O(1) lookup via HashMap, declaration order kept for listing
//! - Construction fails if the default route is missing, so resolution can't

use std::collections::HashMap;

use thiserror::Error;

use crate::config::SiteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("default route '{0}' is not in the route table")]
    MissingDefault(String),

    #[error("route '{0}' is declared more than once")]
    Duplicate(String),
}

/// Fixed mapping from route identifier to fragment resource path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    default_index: usize,
}

impl RouteTable {
    /// Build a table from `(identifier, path)` pairs.
    pub fn new<I, K, V>(entries: I, default_route: &str) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Vec::new();
        let mut index = HashMap::new();

        for (name, path) in entries {
            let name = name.into();
            if index.contains_key(&name) {
                return Err(RouteTableError::Duplicate(name));
            }
            index.insert(name.clone(), table.len());
            table.push((name, path.into()));
        }

        let default_index = *index
            .get(default_route)
            .ok_or_else(|| RouteTableError::MissingDefault(default_route.to_string()))?;

        Ok(Self {
            entries: table,
            index,
            default_index,
        })
    }

    /// Build the table declared in a site configuration.
    pub fn from_config(config: &SiteConfig) -> Result<Self, RouteTableError> {
        Self::new(
            config.routes.iter().map(|r| (r.name.as_str(), r.path.as_str())),
            &config.default_route,
        )
    }

    /// Fragment path for `route`, or the default route's path if unknown.
    pub fn resolve(&self, route: &str) -> &str {
        self.get(route).unwrap_or_else(|| self.default_path())
    }

    /// Identifier of the route `route` resolves to: itself if known,
    /// otherwise the default route.
    pub fn resolve_route<'a>(&'a self, route: &'a str) -> &'a str {
        if self.contains(route) {
            route
        } else {
            self.default_route()
        }
    }

    pub fn get(&self, route: &str) -> Option<&str> {
        self.index.get(route).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, route: &str) -> bool {
        self.index.contains_key(route)
    }

    pub fn default_route(&self) -> &str {
        &self.entries[self.default_index].0
    }

    pub fn default_path(&self) -> &str {
        &self.entries[self.default_index].1
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
