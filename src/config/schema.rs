//! Configuration schema definitions.
//!
//! This module defines the complete application configuration: build
//! options, router settings, logging and the route table. All types derive
//! Serde traits for deserialization from config files, and every section
//! has defaults so a partial (or absent) file still describes a working app.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::build::{AliasMap, BasePath, BuildError};
use crate::history::{History, HistoryMode};
use crate::routing::{ConfigurationError, RouteDefinition, RouteTable};

/// Root configuration of a single-page application shell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Asset base path and import aliases.
    pub build: BuildConfig,

    /// History mode, starting location and not-found view.
    pub router: RouterConfig,

    /// Log verbosity.
    pub logging: LoggingConfig,

    /// Route table, in registration order.
    pub routes: Vec<RouteDefinition>,
}

impl Default for AppConfig {
    /// The virtual-tour shell: map, labs, stories, activities and dev tools.
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            router: RouterConfig::default(),
            logging: LoggingConfig::default(),
            routes: vec![
                RouteDefinition::new("/", "@/views/LocalMap.vue").named("home"),
                RouteDefinition::new("/labs", "@/views/LabsView.vue").named("labs"),
                RouteDefinition::new("/stories", "@/views/StoriesView.vue"),
                RouteDefinition::new("/activities", "@/views/ActivitiesView.vue"),
                RouteDefinition::new("/dev", "@/views/DevTools.vue").named("dev"),
            ],
        }
    }
}

impl AppConfig {
    /// Register the configured routes.
    pub fn route_table(&self) -> Result<RouteTable, ConfigurationError> {
        RouteTable::register(self.routes.iter().cloned())
    }

    pub fn base_path(&self) -> Result<BasePath, BuildError> {
        BasePath::parse(&self.build.base_path)
    }

    pub fn aliases(&self) -> Result<AliasMap, BuildError> {
        AliasMap::from_config(&self.build.alias)
    }

    /// History for the configured mode under the configured base path.
    pub fn history(&self) -> Box<dyn History> {
        self.router.history.build(&self.build.base_path)
    }
}

/// Bundler-facing options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Prefix for generated asset URLs (`./`, `/app/`, or a full URL).
    pub base_path: String,

    /// Import alias → source directory.
    pub alias: BTreeMap<String, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            // Relative, so the bundle works under any repository/sub-path name.
            base_path: "./".to_string(),
            alias: BTreeMap::from([("@".to_string(), "./src".to_string())]),
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Where the location lives in the URL.
    pub history: HistoryMode,

    /// Location the application starts at.
    pub initial_location: String,

    /// Component shown when no route matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::Hash,
            initial_location: "/".to_string(),
            not_found: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for this crate (`RUST_LOG` takes precedence).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
