//! Location normalization.
//!
//! Turns whatever the history layer hands over (`#/labs?tab=2`, `labs/`,
//! `//stories`) into a canonical path plus decoded query pairs, so the
//! matcher only ever sees one spelling of a location.

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// A requested location split into its routable parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Canonical path: leading `/`, no repeated or trailing slashes.
    pub path: String,
    /// Decoded query pairs in their original order.
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parse a raw location string.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        // A second fragment inside the hash location is not part of the route.
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);

        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let query = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path: normalize_path(path),
            query,
        }
    }

    /// Percent-decoded path segments (empty for the root).
    pub fn segments(&self) -> Vec<String> {
        split_segments(&self.path)
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect()
    }

    /// Query value for `key`, first occurrence wins.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Canonicalize a path: leading slash, collapsed separators, no trailing slash.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = split_segments(path).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(path.len() + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("labs"), "/labs");
        assert_eq!(normalize_path("/labs/"), "/labs");
        assert_eq!(normalize_path("//labs///42/"), "/labs/42");
    }

    #[test]
    fn test_hash_prefix_and_query() {
        let loc = Location::parse("#/labs/?tab=robots&tab=chem&q=a+b");
        assert_eq!(loc.path, "/labs");
        assert_eq!(loc.query.len(), 3);
        assert_eq!(loc.query_value("tab"), Some("robots"));
        assert_eq!(loc.query_value("q"), Some("a b"));
        assert_eq!(loc.query_value("missing"), None);
    }

    #[test]
    fn test_inner_fragment_is_dropped() {
        let loc = Location::parse("/stories#chapter-2");
        assert_eq!(loc.path, "/stories");
        assert!(loc.query.is_empty());
    }

    #[test]
    fn test_segments_are_decoded() {
        let loc = Location::parse("/labs/robot%20arm");
        assert_eq!(loc.segments(), vec!["labs".to_string(), "robot arm".to_string()]);
        assert!(Location::parse("/").segments().is_empty());
    }
}
