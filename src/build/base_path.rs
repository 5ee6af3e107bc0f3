//! Public base path prepended to generated asset URLs.

use std::fmt;

use url::Url;

use crate::build::BuildError;

/// Prefix for generated asset URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasePath {
    /// `./` style: assets resolve relative to the served page.
    Relative(String),
    /// `/app/` style: assets live under a fixed path on the host.
    Absolute(String),
    /// Assets served from another origin.
    Url(Url),
}

impl BasePath {
    /// Parse a configured base path, adding a missing trailing slash.
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        let invalid = |reason: &str| BuildError::InvalidBasePath {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if trimmed.contains(['?', '#']) {
            return Err(invalid("must not contain a query or fragment"));
        }

        if trimmed.starts_with("./") || trimmed == "." {
            return Ok(BasePath::Relative(with_trailing_slash(trimmed)));
        }
        if trimmed.starts_with('/') {
            if trimmed.starts_with("//") {
                return Err(invalid("protocol-relative bases are not supported"));
            }
            return Ok(BasePath::Absolute(with_trailing_slash(trimmed)));
        }

        match Url::parse(trimmed) {
            Ok(url) if url.cannot_be_a_base() => Err(invalid("URL cannot be used as a base")),
            Ok(mut url) => {
                let path = with_trailing_slash(url.path());
                url.set_path(&path);
                Ok(BasePath::Url(url))
            }
            Err(_) => Err(invalid("expected `./…`, `/…` or an absolute URL")),
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, BasePath::Relative(_))
    }

    /// URL of a generated asset (`assets/index.js`) under this base.
    pub fn asset_url(&self, asset: &str) -> String {
        let asset = asset.trim_start_matches('/');
        match self {
            BasePath::Relative(base) | BasePath::Absolute(base) => format!("{base}{asset}"),
            BasePath::Url(base) => match base.join(asset) {
                Ok(url) => url.to_string(),
                Err(_) => format!("{base}{asset}"),
            },
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePath::Relative(base) | BasePath::Absolute(base) => f.write_str(base),
            BasePath::Url(url) => write!(f, "{url}"),
        }
    }
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
