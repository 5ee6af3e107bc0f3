//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(location) / navigate_named(name, params)
//!     → resolver.rs (route table lookup)
//!     → state.rs (replace NavigationState)
//!     → observer.rs (notify callbacks in subscription order)
//!     → Return: RouteMatch or NotFoundError
//! ```
//!
//! # Design Decisions
//! - Single-threaded: navigation never suspends and never performs I/O
//! - State lives in the resolver instance; several resolvers can coexist

pub mod observer;
pub mod resolver;
pub mod state;

pub use observer::{ObserverRegistry, Subscription};
pub use resolver::RouteResolver;
pub use state::NavigationState;
