//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / navigation / config
//!     → tracing events (structured fields: location, route, path)
//!     → logging.rs subscriber (env filter → stderr)
//! ```

pub mod logging;

pub use logging::init_logging;
