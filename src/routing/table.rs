//! Route table and lookup.
//!
//! # Responsibilities
//! - Validate and store route definitions (register once, immutable after)
//! - Look up the most specific route for a location
//! - Index routes by name for programmatic navigation
//!
//! # Design Decisions
//! - Definitions are shared via `Arc` so one table can back many resolvers
//! - O(n) scan over compiled patterns (route tables are small)
//! - Explicit `None` on no match rather than a silent default route

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::error::{ConfigurationError, NotFoundError, RouteError};
use crate::routing::location::Location;
use crate::routing::pattern::RoutePattern;

/// One navigable location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Path pattern, unique within the table.
    pub path: String,

    /// Optional unique name used for programmatic navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Opaque reference to the view; resolved by the view layer.
    pub component: String,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            component: component.into(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Result of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Arc<RouteDefinition>,
    /// Decoded path parameters.
    pub params: BTreeMap<String, String>,
    /// Decoded query pairs of the requested location.
    pub query: Vec<(String, String)>,
}

impl RouteMatch {
    pub fn name(&self) -> Option<&str> {
        self.route.name.as_deref()
    }

    pub fn component(&self) -> &str {
        &self.route.component
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct CompiledRoute {
    definition: Arc<RouteDefinition>,
    pattern: RoutePattern,
}

/// Immutable, validated set of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Compile and validate an ordered sequence of definitions.
    ///
    /// Fails on the first invalid pattern, duplicate path or duplicate name.
    pub fn register<I>(definitions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut routes = Vec::new();
        let mut by_path: HashMap<String, usize> = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, definition) in definitions.into_iter().enumerate() {
            let pattern = RoutePattern::parse(&definition.path)?;

            if let Some(&first) = by_path.get(pattern.as_str()) {
                return Err(ConfigurationError::DuplicatePath {
                    path: definition.path,
                    first,
                    second: index,
                });
            }
            by_path.insert(pattern.as_str().to_string(), index);

            if let Some(name) = &definition.name {
                if let Some(&first) = by_name.get(name) {
                    return Err(ConfigurationError::DuplicateName {
                        name: name.clone(),
                        first,
                        second: index,
                    });
                }
                by_name.insert(name.clone(), index);
            }

            routes.push(CompiledRoute {
                definition: Arc::new(definition),
                pattern,
            });
        }

        tracing::debug!(routes = routes.len(), named = by_name.len(), "Route table registered");
        Ok(Self { routes, by_name })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDefinition>> {
        self.routes.iter().map(|r| &r.definition)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.by_name.get(name).map(|&i| &self.routes[i].definition)
    }

    /// Find the most specific route for a raw location string.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        self.resolve_location(&Location::parse(location))
    }

    /// Find the most specific route for an already parsed location.
    ///
    /// Greatest specificity wins; among equals the first registered wins.
    pub fn resolve_location(&self, location: &Location) -> Option<RouteMatch> {
        let segments = location.segments();
        let mut best: Option<(&CompiledRoute, BTreeMap<String, String>)> = None;

        for route in &self.routes {
            let Some(params) = route.pattern.matches(&segments) else {
                continue;
            };
            let better = match &best {
                Some((current, _)) => {
                    route.pattern.specificity() > current.pattern.specificity()
                }
                None => true,
            };
            if better {
                best = Some((route, params));
            }
        }

        best.map(|(route, params)| RouteMatch {
            route: Arc::clone(&route.definition),
            params,
            query: location.query.clone(),
        })
    }

    /// Build the location of a named route from its parameters.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let index = self.named_index(name)?;

        self.routes[index]
            .pattern
            .build(|key| params.iter().find(|(k, _)| *k == key).map(|(_, v)| *v))
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    fn named_index(&self, name: &str) -> Result<usize, RouteError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))
    }

    /// Resolve a named route directly, bypassing precedence between routes.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<(String, RouteMatch), RouteError> {
        let location = self.href(name, params)?;
        let route = &self.routes[self.named_index(name)?];

        let parsed = Location::parse(&location);
        let params = route
            .pattern
            .matches(&parsed.segments())
            .ok_or_else(|| NotFoundError::new(location.clone()))?;

        Ok((
            location,
            RouteMatch {
                route: Arc::clone(&route.definition),
                params,
                query: Vec::new(),
            },
        ))
    }
}
