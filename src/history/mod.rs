//! History modes.
//!
//! Translate between full hrefs (what the address bar shows) and the
//! locations the resolver navigates to.
//!
//! # Design Decisions
//! - Hash mode keeps the location in the fragment, so any static host works
//! - Web mode maps the URL path under the base path
//! - Both are pure string transforms; no browser state lives here

mod hash;
mod web;

pub use hash::HashHistory;
pub use web::WebHistory;

use serde::{Deserialize, Serialize};

/// Converts between hrefs and resolver locations.
pub trait History: std::fmt::Debug {
    /// Location (`/labs?x=1`) addressed by an href.
    fn location(&self, href: &str) -> String;

    /// Href that addresses `location`.
    fn href(&self, location: &str) -> String;
}

/// Which history implementation the application uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Hash,
    Web,
}

impl HistoryMode {
    /// Build the history for this mode under `base`.
    pub fn build(self, base: &str) -> Box<dyn History> {
        match self {
            HistoryMode::Hash => Box::new(HashHistory::new(base)),
            HistoryMode::Web => Box::new(WebHistory::new(base)),
        }
    }
}

/// Strip a leading base prefix, keeping the leading `/` of the remainder.
fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() || base == "." {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

fn ensure_leading_slash(location: &str) -> String {
    if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{location}")
    }
}
