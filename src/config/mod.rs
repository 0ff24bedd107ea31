//! Site configuration subsystem.
//!
//! # Data Flow
//! ```text
//! site-router.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → RouteTable + Router options at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once; the route table never changes at runtime
//! - All fields have defaults, so an empty file yields the stock site
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::FetchConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::SiteConfig;
