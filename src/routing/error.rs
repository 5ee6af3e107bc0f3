//! Routing error types.
//!
//! # Design Decisions
//! - Registration errors are fatal and carry enough context to fix the table
//! - A missing route is an ordinary, recoverable outcome of navigation
//! - Named-navigation failures wrap the not-found case instead of duplicating it

use thiserror::Error;

/// Raised while registering a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("duplicate route path `{path}` (entries {first} and {second})")]
    DuplicatePath {
        path: String,
        first: usize,
        second: usize,
    },

    #[error("duplicate route name `{name}` (entries {first} and {second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("invalid route pattern `{path}`: {reason}")]
    InvalidPattern { path: String, reason: String },
}

/// No registered route matches the requested location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches `{location}`")]
pub struct NotFoundError {
    pub location: String,
}

impl NotFoundError {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Failure of programmatic (name-based) navigation or href building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route named `{0}`")]
    UnknownName(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}
