//! Metrics collection.
//!
//! # Metrics
//! - `site_navigations_total` (counter): navigations by outcome
//! - `site_fragment_fetch_seconds` (histogram): fetch latency
//! - `site_behavior_failures_total` (counter): failed fragment behaviors

use std::time::Duration;

/// Record the outcome of one navigation (`loaded`, `failed`, `superseded`).
pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("site_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_fetch_duration(elapsed: Duration) {
    metrics::histogram!("site_fragment_fetch_seconds").record(elapsed.as_secs_f64());
}

pub fn record_behavior_failure(behavior: &str) {
    metrics::counter!("site_behavior_failures_total", "behavior" => behavior.to_string()).increment(1);
}
