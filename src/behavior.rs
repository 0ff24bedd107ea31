//! Fragment behaviors.
//!
//! Fragments may carry behavior as well as markup. Instead of evaluating
//! script text, a fragment names behaviors with `data-behavior="name"` and
//! the host registers a typed callback per name. Callbacks may also be
//! attached to a route so they run whenever that route is mounted.
//!
//! Each callback sees only a [`BehaviorContext`]; failures and panics are
//! caught per callback, logged, and never abort the navigation or the
//! callbacks after it.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;

use crate::dom::fragment;
use crate::observability::metrics;

/// What a behavior callback can see.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorContext<'a> {
    /// Route identifier that was just mounted.
    pub route: &'a str,
    /// Markup now in the content region.
    pub markup: &'a str,
    /// Name this callback was invoked under.
    pub behavior: &'a str,
}

pub type BehaviorResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type BehaviorFn = Box<dyn Fn(&BehaviorContext<'_>) -> BehaviorResult + Send + Sync>;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("no behavior registered under '{0}'")]
    Unknown(String),

    #[error("behavior '{name}' failed: {message}")]
    Failed { name: String, message: String },

    #[error("behavior '{0}' panicked")]
    Panicked(String),
}

/// Summary of one behavior pass.
#[derive(Debug, Default)]
pub struct BehaviorReport {
    /// Behaviors that ran to completion, in order.
    pub completed: Vec<String>,
    pub failures: Vec<BehaviorError>,
}

/// Typed callback registry keyed by behavior name and by route.
#[derive(Default)]
pub struct BehaviorRegistry {
    named: HashMap<String, BehaviorFn>,
    per_route: HashMap<String, Vec<(String, BehaviorFn)>>,
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .field("per_route", &self.per_route.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback run for `data-behavior="name"` markers.
    pub fn register<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&BehaviorContext<'_>) -> BehaviorResult + Send + Sync + 'static,
    {
        self.named.insert(name.into(), Box::new(callback));
        self
    }

    /// Register a callback run after every successful load of `route`.
    pub fn on_route<F>(mut self, route: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&BehaviorContext<'_>) -> BehaviorResult + Send + Sync + 'static,
    {
        let route = route.into();
        let name = format!("route:{route}");
        self.per_route
            .entry(route)
            .or_default()
            .push((name, Box::new(callback)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.per_route.is_empty()
    }

    /// Run the behaviors for freshly mounted `markup`.
    ///
    /// Markers run first in document order, then the route's own callbacks
    /// in registration order.
    pub fn run(&self, route: &str, markup: &str) -> BehaviorReport {
        let mut report = BehaviorReport::default();

        let ignored = fragment::unmarked_scripts(markup);
        if ignored > 0 {
            tracing::debug!(route, scripts = ignored, "Ignoring inline scripts without a behavior marker");
        }

        for name in fragment::behavior_markers(markup) {
            let outcome = match self.named.get(&name) {
                Some(callback) => invoke(callback, route, markup, &name),
                None => Err(BehaviorError::Unknown(name.clone())),
            };
            report.record(name, outcome);
        }

        for (name, callback) in self.per_route.get(route).into_iter().flatten() {
            let outcome = invoke(callback, route, markup, name);
            report.record(name.clone(), outcome);
        }

        report
    }
}

impl BehaviorReport {
    fn record(&mut self, name: String, outcome: Result<(), BehaviorError>) {
        match outcome {
            Ok(()) => self.completed.push(name),
            Err(error) => {
                tracing::warn!(behavior = %name, error = %error, "Fragment behavior failed");
                metrics::record_behavior_failure(&name);
                self.failures.push(error);
            }
        }
    }
}

fn invoke(callback: &BehaviorFn, route: &str, markup: &str, name: &str) -> Result<(), BehaviorError> {
    let context = BehaviorContext {
        route,
        markup,
        behavior: name,
    };

    match catch_unwind(AssertUnwindSafe(|| callback(&context))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(BehaviorError::Failed {
            name: name.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(BehaviorError::Panicked(name.to_string())),
    }
}
