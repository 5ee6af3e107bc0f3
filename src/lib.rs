//! Client-side route resolution for single-page applications.
//!
//! A static route table, a resolver that tracks the current location and
//! notifies observers, hash/web history modes, and the build options
//! (asset base path, import aliases) the shell is deployed with.

pub mod build;
pub mod config;
pub mod history;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::AppConfig;
pub use navigation::{NavigationState, RouteResolver, Subscription};
pub use routing::{ConfigurationError, NotFoundError, RouteDefinition, RouteMatch, RouteTable};
