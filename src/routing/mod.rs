//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteDefinition[]
//!     → pattern.rs (parse patterns, reject malformed ones)
//!     → table.rs (reject duplicate paths / names)
//!     → Freeze as immutable RouteTable
//!
//! Lookup:
//!     requested location (`#/labs/42?tab=1`)
//!     → location.rs (normalize path, decode query)
//!     → table.rs (most specific matching pattern)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the lookup path
//! - Deterministic: static segments outrank parameters, then registration order

pub mod error;
pub mod location;
pub mod pattern;
pub mod table;

pub use error::{ConfigurationError, NotFoundError, RouteError};
pub use location::Location;
pub use pattern::RoutePattern;
pub use table::{RouteDefinition, RouteMatch, RouteTable};
