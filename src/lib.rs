//! Fragment router for a static informational site.
//!
//! Loads HTML fragments for named routes into a single content region,
//! keeps the page title, active navigation links, focus and browser-style
//! history consistent, and runs typed fragment behaviors after each load.

pub mod behavior;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod history;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use behavior::BehaviorRegistry;
pub use config::schema::SiteConfig;
pub use routing::{NavigationOutcome, RouteTable, Router};
