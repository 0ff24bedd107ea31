//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, fetchers, behaviors produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (navigation counters, fetch latency)
//!
//! Consumers:
//!     → stdout (fmt subscriber, RUST_LOG filter)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (route, path, error) on every navigation event
//! - Metrics go through the `metrics` facade; no recorder means no cost

pub mod logging;
pub mod metrics;
