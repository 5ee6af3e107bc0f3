//! Hash-mode history: the location lives in the URL fragment.

use url::Url;

use crate::history::{History, ensure_leading_slash};

#[derive(Debug, Clone)]
pub struct HashHistory {
    base: String,
}

impl HashHistory {
    /// `base` is emitted verbatim in front of the `#` (`./`, `/app/`, a full URL).
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl History for HashHistory {
    fn location(&self, href: &str) -> String {
        let fragment = if let Some(rest) = href.strip_prefix('#') {
            rest.to_string()
        } else if let Ok(url) = Url::parse(href) {
            url.fragment().unwrap_or_default().to_string()
        } else {
            href.split_once('#')
                .map(|(_, rest)| rest.to_string())
                .unwrap_or_default()
        };

        if fragment.is_empty() {
            "/".to_string()
        } else {
            ensure_leading_slash(&fragment)
        }
    }

    fn href(&self, location: &str) -> String {
        format!("{}#{}", self.base, ensure_leading_slash(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_hrefs() {
        let history = HashHistory::new("./");
        assert_eq!(history.location("#/labs"), "/labs");
        assert_eq!(history.location("https://tour.example/app/#/labs?x=1"), "/labs?x=1");
        assert_eq!(history.location("https://tour.example/app/"), "/");
        assert_eq!(history.location("./index.html#/stories"), "/stories");
        assert_eq!(history.location("#labs"), "/labs");
        assert_eq!(history.location("#"), "/");
    }

    #[test]
    fn test_href_round_trip() {
        let history = HashHistory::new("https://tour.example/app/");
        let href = history.href("/activities");
        assert_eq!(href, "https://tour.example/app/#/activities");
        assert_eq!(history.location(&href), "/activities");

        assert_eq!(HashHistory::new("./").href("dev"), "./#/dev");
    }
}
