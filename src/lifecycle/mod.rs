//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Compile route table → Build fetcher → Router
//!     → Router::start (year, initial route from URL fragment, first load,
//!       bind navigation handlers)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then the first load
//! - Handlers are bound only after the first load completes

pub mod startup;

pub use startup::{build_router, build_router_with, StartupError};
