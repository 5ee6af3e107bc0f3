//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → route table registered once, build options parsed once
//!
//! While developing (`check --watch`):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → valid configs are reported, invalid ones logged
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table never changes at runtime
//! - All fields have defaults; an empty file describes the stock shell
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, load_app, load_config, parse_config};
pub use schema::{AppConfig, BuildConfig, LoggingConfig, RouterConfig};
pub use validation::{ValidationError, validate_config};
pub use watcher::ConfigWatcher;
