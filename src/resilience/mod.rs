//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fragment fetch:
//!     → timeouts.rs (optional deadline around the fetch future)
//!     → On expiry: FetchError::Timeout, shown like any other load failure
//! ```
//!
//! # Design Decisions
//! - A hung request must not leave the page waiting forever
//! - No retries: failures surface immediately and navigation is user-driven

pub mod timeouts;
