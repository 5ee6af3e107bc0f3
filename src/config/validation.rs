//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route patterns, path/name uniqueness and component references
//! - Check build options (base path, aliases) and the log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::build::{AliasMap, BasePath, BuildError};
use crate::config::schema::AppConfig;
use crate::routing::{ConfigurationError, RoutePattern};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routes[{index}]: {source}")]
    Route {
        index: usize,
        #[source]
        source: ConfigurationError,
    },

    #[error("routes[{index}]: component must not be empty")]
    EmptyComponent { index: usize },

    #[error("routes[{index}]: name must not be empty")]
    EmptyName { index: usize },

    #[error("build: {0}")]
    Build(#[from] BuildError),

    #[error("router.initial_location must not be empty")]
    EmptyInitialLocation,

    #[error("router.not_found must not be empty")]
    EmptyNotFound,

    #[error("logging.level `{0}` is not a log level")]
    LogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_routes(config, &mut errors);

    if let Err(e) = BasePath::parse(&config.build.base_path) {
        errors.push(e.into());
    }
    if let Err(e) = AliasMap::from_config(&config.build.alias) {
        errors.push(e.into());
    }

    if config.router.initial_location.trim().is_empty() {
        errors.push(ValidationError::EmptyInitialLocation);
    }
    if config
        .router
        .not_found
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        errors.push(ValidationError::EmptyNotFound);
    }

    if config.logging.level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::LogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(config: &AppConfig, errors: &mut Vec<ValidationError>) {
    let mut paths: HashMap<String, usize> = HashMap::new();
    let mut names: HashMap<&str, usize> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.component.trim().is_empty() {
            errors.push(ValidationError::EmptyComponent { index });
        }

        match RoutePattern::parse(&route.path) {
            Ok(pattern) => {
                if let Some(&first) = paths.get(pattern.as_str()) {
                    errors.push(ValidationError::Route {
                        index,
                        source: ConfigurationError::DuplicatePath {
                            path: route.path.clone(),
                            first,
                            second: index,
                        },
                    });
                } else {
                    paths.insert(pattern.as_str().to_string(), index);
                }
            }
            Err(source) => errors.push(ValidationError::Route { index, source }),
        }

        if let Some(name) = route.name.as_deref() {
            if name.trim().is_empty() {
                errors.push(ValidationError::EmptyName { index });
            } else if let Some(&first) = names.get(name) {
                errors.push(ValidationError::Route {
                    index,
                    source: ConfigurationError::DuplicateName {
                        name: name.to_string(),
                        first,
                        second: index,
                    },
                });
            } else {
                names.insert(name, index);
            }
        }
    }
}
