//! Build-time options consumed by the asset/import pipeline.
//!
//! # Responsibilities
//! - Base path: prefix for generated asset URLs (relative or absolute deploys)
//! - Path alias: symbolic import prefixes mapped to source directories
//!
//! # Design Decisions
//! - Parsed once from config; invalid values are reported, never guessed at
//! - Nothing here is consulted by the resolver

mod alias;
mod base_path;

pub use alias::AliasMap;
pub use base_path::BasePath;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("invalid base path `{value}`: {reason}")]
    InvalidBasePath { value: String, reason: String },

    #[error("invalid alias `{key}` -> `{target}`: {reason}")]
    InvalidAlias {
        key: String,
        target: String,
        reason: String,
    },
}
