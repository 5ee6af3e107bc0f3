//! Web-mode history: the location is the URL path under the base path.

use url::Url;

use crate::history::{History, ensure_leading_slash, strip_base};

#[derive(Debug, Clone)]
pub struct WebHistory {
    /// Base path without trailing slash; empty for the site root.
    prefix: String,
}

impl WebHistory {
    pub fn new(base: &str) -> Self {
        let path = match Url::parse(base) {
            Ok(url) => url.path().to_string(),
            Err(_) => base.to_string(),
        };
        // Relative bases address the current directory; treat them as the root.
        let prefix = if path.starts_with('/') {
            path.trim_end_matches('/').to_string()
        } else {
            String::new()
        };
        Self { prefix }
    }
}

impl History for WebHistory {
    fn location(&self, href: &str) -> String {
        let (path, query) = match Url::parse(href) {
            Ok(url) => (url.path().to_string(), url.query().map(str::to_string)),
            Err(_) => {
                let without_fragment = href.split_once('#').map_or(href, |(before, _)| before);
                match without_fragment.split_once('?') {
                    Some((path, query)) => (path.to_string(), Some(query.to_string())),
                    None => (without_fragment.to_string(), None),
                }
            }
        };

        let mut location = ensure_leading_slash(strip_base(&path, &self.prefix));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            location.push('?');
            location.push_str(&query);
        }
        location
    }

    fn href(&self, location: &str) -> String {
        format!("{}{}", self.prefix, ensure_leading_slash(location))
    }
}
