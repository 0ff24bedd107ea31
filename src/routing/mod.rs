//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Click / history pop / startup (route identifier)
//!     → table.rs (resolve identifier, default fallback)
//!     → router.rs (fetch fragment, sequence concurrent navigations)
//!     → state.rs (apply DOM + title + focus + history in one step)
//!     → behavior registry (fragment behaviors, document order)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → RouteTable (frozen, immutable)
//! ```
//!
//! # Design Decisions
//! - Route table built at startup, immutable at runtime
//! - Resolution never fails: unknown identifiers load the default route
//! - Newest navigation wins; stale responses are discarded
//! - Failed loads only touch the content region

pub mod router;
pub mod state;
pub mod table;

pub use router::{NavigationOutcome, Router, RouterOptions};
pub use state::NavigationState;
pub use table::{RouteTable, RouteTableError};
