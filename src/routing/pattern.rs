//! Route path patterns.
//!
//! # Responsibilities
//! - Parse `/labs/:id` style patterns once, at registration
//! - Match a decoded location against a pattern, extracting parameters
//! - Rank patterns so the most specific one wins a lookup
//! - Build a concrete path back from parameters (named navigation)
//!
//! # Design Decisions
//! - Static comparison is case-sensitive and happens on decoded segments
//! - `:name` matches exactly one segment, `:name*` (or `*`) the remainder
//! - No regex: matching is a single pass over the segments

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::routing::error::ConfigurationError;
use crate::routing::location::split_segments;

/// Name given to an anonymous `*` catch-all.
pub const DEFAULT_CATCH_ALL: &str = "pathMatch";

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// Ranking key for patterns matching the same location; greater is more specific.
///
/// Field order is the comparison order: leading static segments first, then
/// total static segments, then "no catch-all", then segment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    leading_static: usize,
    static_count: usize,
    exact: bool,
    segments: usize,
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    normalized: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern, rejecting malformed parameters and misplaced catch-alls.
    pub fn parse(path: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidPattern {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') {
            return Err(invalid("pattern must start with `/`"));
        }

        let raw: Vec<&str> = split_segments(path).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut seen_params: Vec<&str> = Vec::new();

        for (i, part) in raw.iter().enumerate() {
            let is_last = i + 1 == raw.len();

            let segment = if *part == "*" {
                Segment::CatchAll(DEFAULT_CATCH_ALL.to_string())
            } else if let Some(param) = part.strip_prefix(':') {
                let (name, catch_all) = match param.strip_suffix('*') {
                    Some(name) => (name, true),
                    None => (param, false),
                };
                if !is_param_name(name) {
                    return Err(invalid(&format!("bad parameter name `{name}`")));
                }
                if seen_params.contains(&name) {
                    return Err(invalid(&format!("parameter `{name}` appears twice")));
                }
                seen_params.push(name);
                if catch_all {
                    Segment::CatchAll(name.to_string())
                } else {
                    Segment::Param(name.to_string())
                }
            } else if part.contains(':') || part.contains('*') {
                return Err(invalid(&format!("unexpected `:` or `*` in segment `{part}`")));
            } else if part.contains(['?', '#']) {
                // Locations lose their query and fragment before matching.
                return Err(invalid(&format!("unexpected `?` or `#` in segment `{part}`")));
            } else {
                Segment::Static(percent_decode_str(part).decode_utf8_lossy().into_owned())
            };

            if matches!(segment, Segment::CatchAll(_)) && !is_last {
                return Err(invalid("catch-all must be the last segment"));
            }
            segments.push(segment);
        }

        let normalized = normalize(&segments);

        Ok(Self {
            normalized,
            segments,
        })
    }

    /// Canonical spelling of the pattern; used for duplicate detection.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// True when the pattern has no parameters or catch-all.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Static(_)))
    }

    pub fn specificity(&self) -> Specificity {
        let leading_static = self
            .segments
            .iter()
            .take_while(|s| matches!(s, Segment::Static(_)))
            .count();
        let static_count = self
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count();
        let exact = !self
            .segments
            .iter()
            .any(|s| matches!(s, Segment::CatchAll(_)));

        Specificity {
            leading_static,
            static_count,
            exact,
            segments: self.segments.len(),
        }
    }

    /// Names of all parameters, in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match decoded path segments, returning the extracted parameters.
    pub fn matches(&self, path: &[String]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    if path.get(i)? != expected {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), path.get(i)?.clone());
                }
                Segment::CatchAll(name) => {
                    let rest = path.get(i..).unwrap_or_default().join("/");
                    params.insert(name.clone(), rest);
                    return Some(params);
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Build a concrete path from parameters.
    ///
    /// Values are percent-encoded; a catch-all keeps its `/` separators and
    /// may be omitted. Returns the name of the first missing parameter.
    pub fn build<'a, F>(&self, lookup: F) -> Result<String, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Static(value) => {
                    out.push('/');
                    out.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::Param(name) => {
                    let value = lookup(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| name.clone())?;
                    out.push('/');
                    out.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    for part in lookup(name).map(split_segments).into_iter().flatten() {
                        out.push('/');
                        out.extend(utf8_percent_encode(part, SEGMENT));
                    }
                }
            }
        }

        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

/// Canonical key: statics decoded then re-encoded, so `/a b` and `/a%20b` agree.
fn normalize(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            Segment::Static(value) => out.extend(utf8_percent_encode(value, SEGMENT)),
            Segment::Param(name) => {
                out.push(':');
                out.push_str(name);
            }
            Segment::CatchAll(name) => {
                out.push(':');
                out.push_str(name);
                out.push('*');
            }
        }
    }
    out
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        split_segments(path).map(str::to_string).collect()
    }

    #[test]
    fn test_static_pattern() {
        let pattern = RoutePattern::parse("/labs/").unwrap();
        assert_eq!(pattern.as_str(), "/labs");
        assert!(pattern.is_static());
        assert!(pattern.matches(&segs("/labs")).unwrap().is_empty());
        assert!(pattern.matches(&segs("/labs/1")).is_none());
        assert!(pattern.matches(&segs("/Labs")).is_none());
    }

    #[test]
    fn test_root_pattern() {
        let root = RoutePattern::parse("/").unwrap();
        assert_eq!(root.as_str(), "/");
        assert!(root.matches(&[]).is_some());
        assert!(root.matches(&segs("/labs")).is_none());
    }

    #[test]
    fn test_param_extraction() {
        let pattern = RoutePattern::parse("/labs/:lab/rooms/:room").unwrap();
        let params = pattern.matches(&segs("/labs/physics/rooms/101")).unwrap();
        assert_eq!(params["lab"], "physics");
        assert_eq!(params["room"], "101");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["lab", "room"]);
    }

    #[test]
    fn test_catch_all() {
        let pattern = RoutePattern::parse("/docs/:rest*").unwrap();
        assert_eq!(pattern.matches(&segs("/docs/a/b/c")).unwrap()["rest"], "a/b/c");
        assert_eq!(pattern.matches(&segs("/docs")).unwrap()["rest"], "");

        let anonymous = RoutePattern::parse("/*").unwrap();
        assert_eq!(anonymous.matches(&segs("/x/y")).unwrap()[DEFAULT_CATCH_ALL], "x/y");
    }

    #[test]
    fn test_invalid_patterns() {
        let bad_patterns = [
            "labs",
            "/labs/:",
            "/a/:id/:id",
            "/*/tail",
            "/la:bs",
            "/x/:na-me",
            "/labs?x",
            "/a#b",
        ];
        for bad in bad_patterns {
            assert!(
                matches!(
                    RoutePattern::parse(bad),
                    Err(ConfigurationError::InvalidPattern { .. })
                ),
                "expected `{bad}` to be rejected"
            );
        }
    }

    #[test]
    fn test_normalized_form_uses_decoded_statics() {
        let spaced = RoutePattern::parse("/a b/:id").unwrap();
        let encoded = RoutePattern::parse("/a%20b/:id").unwrap();
        assert_eq!(spaced.as_str(), "/a%20b/:id");
        assert_eq!(spaced.as_str(), encoded.as_str());

        assert_eq!(RoutePattern::parse("/*").unwrap().as_str(), "/:pathMatch*");
        assert_eq!(RoutePattern::parse("/docs/:rest*").unwrap().as_str(), "/docs/:rest*");
    }

    #[test]
    fn test_specificity_order() {
        let rank = |p: &str| RoutePattern::parse(p).unwrap().specificity();
        assert!(rank("/labs/new") > rank("/labs/:id"));
        assert!(rank("/labs/:id") > rank("/:section/:id"));
        assert!(rank("/labs/:id") > rank("/labs/:rest*"));
        assert!(rank("/:a/x") > rank("/:a/:b"));
    }

    #[test]
    fn test_build_encodes_values() {
        let pattern = RoutePattern::parse("/labs/:id").unwrap();
        let built = pattern
            .build(|name| (name == "id").then_some("robot arm/2"))
            .unwrap();
        assert_eq!(built, "/labs/robot%20arm%2F2");

        assert_eq!(pattern.build(|_| None), Err("id".to_string()));
        assert_eq!(RoutePattern::parse("/").unwrap().build(|_| None).unwrap(), "/");
    }

    #[test]
    fn test_build_catch_all() {
        let pattern = RoutePattern::parse("/docs/:rest*").unwrap();
        assert_eq!(pattern.build(|_| Some("a/b")).unwrap(), "/docs/a/b");
        assert_eq!(pattern.build(|_| None).unwrap(), "/docs");
    }
}
