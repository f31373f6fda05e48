//! Current location as reported by the navigation collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A path, its decoded query pairs, and the location remembered in
/// navigation state by a route guard that redirected to login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub path: String,

    #[serde(default)]
    pub query: Vec<(String, String)>,

    /// Pre-redirect location carried in navigation state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered: Option<String>,
}

impl Location {
    /// Parses `path?query#fragment`. The fragment is dropped.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (href, Vec::new()),
        };

        Self {
            path: if path.is_empty() { "/" } else { path }.to_string(),
            query,
            remembered: None,
        }
    }

    pub fn with_remembered(mut self, href: impl Into<String>) -> Self {
        self.remembered = Some(href.into());
        self
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Path plus re-encoded query string, without navigation state.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_only() {
        let location = Location::parse("/listings/42");
        assert_eq!(location.path, "/listings/42");
        assert!(location.query.is_empty());
        assert_eq!(location.href(), "/listings/42");
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let location = Location::parse("/login?redirectTo=%2Fmy-listings%3Ftab%3Ddrafts&x=a+b#top");
        assert_eq!(location.path, "/login");
        assert_eq!(
            location.query_param("redirectTo"),
            Some("/my-listings?tab=drafts")
        );
        assert_eq!(location.query_param("x"), Some("a b"));
        assert_eq!(location.query_param("missing"), None);
    }

    #[test]
    fn test_parse_edge_cases() {
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?a=1").path, "/");

        let location = Location::parse("/p?flag&&empty=");
        assert_eq!(location.query_param("flag"), Some(""));
        assert_eq!(location.query_param("empty"), Some(""));

        // Invalid UTF-8 escapes decode lossily
        let location = Location::parse("/p?bad=%FF");
        assert_eq!(location.query_param("bad"), Some("\u{FFFD}"));
    }

    #[test]
    fn test_parse_decodes_control_characters() {
        let location = Location::parse("/login?redirectTo=/%09/evil.example.com");
        assert_eq!(location.query_param("redirectTo"), Some("/\t/evil.example.com"));
    }

    #[test]
    fn test_first_query_value_wins() {
        let location = Location::parse("/login?redirectTo=/a&redirectTo=/b");
        assert_eq!(location.query_param("redirectTo"), Some("/a"));
    }

    #[test]
    fn test_href_reencodes_query() {
        let location = Location::parse("/search?q=red car&page=2");
        assert_eq!(location.href(), "/search?q=red%20car&page=2");
        assert_eq!(location.to_string(), location.href());
    }

    #[test]
    fn test_remembered_is_not_part_of_href() {
        let location = Location::parse("/login").with_remembered("/admin/settings");
        assert_eq!(location.href(), "/login");
        assert_eq!(location.remembered.as_deref(), Some("/admin/settings"));
    }
}
