//! Fetched resources and their header sets
//!
//! A [`Resource`] is the cached result of one GET: status code, headers and
//! raw body. Header names are case-insensitive, so [`Headers`] keys entries by
//! their lowercased name while remembering the casing that was first seen.

use std::collections::{BTreeMap, BTreeSet};

/// Case-insensitive header map
///
/// Inserting a name that differs only in case from an existing one replaces
/// the value of that entry. Iteration yields the original name casing, in
/// lowercased-name order.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: BTreeMap<String, (String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any entry with the same name in any casing
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.get_mut(&name.to_ascii_lowercase()) {
            Some(entry) => entry.1 = value,
            None => {
                self.entries.insert(name.to_ascii_lowercase(), (name, value));
            }
        }
    }

    /// Looks up a header value by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs with the original name casing
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, (_, va)), (kb, (_, vb)))| ka == kb && va == vb)
    }
}

impl Eq for Headers {}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Cached resource resulting from an HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub status: u16,
    pub headers: Headers,
    pub data: Vec<u8>,
}

impl Resource {
    /// The `Content-Type` header split into its `;`-separated tokens
    ///
    /// Tokens are trimmed and empty ones dropped, so
    /// `text/html; charset=utf-8` yields `{"charset=utf-8", "text/html"}`.
    /// A missing header gives an empty set.
    pub fn content_types(&self) -> BTreeSet<String> {
        self.headers
            .get("Content-Type")
            .map(|value| split_list(value, ';'))
            .unwrap_or_default()
    }

    /// Whether the resource declares itself as HTML
    pub fn is_html(&self) -> bool {
        self.content_types().contains("text/html")
    }
}

/// Splits on `sep`, trimming whitespace and discarding empty entries
pub fn split_list(text: &str, sep: char) -> BTreeSet<String> {
    text.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_resource(content_type: &str) -> Resource {
        Resource {
            status: 200,
            headers: [("Content-Type", content_type)].into_iter().collect(),
            data: b"<html></html>".to_vec(),
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");
        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(headers.get("Content-type"), Some("text/html"));
    }

    #[test]
    fn test_different_casing_collapses() {
        let mut headers = Headers::new();
        headers.insert("X-Thing", "one");
        headers.insert("x-thing", "two");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-THING"), Some("two"));
    }

    #[test]
    fn test_iteration_preserves_original_case() {
        let headers: Headers = [("Content-Type", "text/plain"), ("ETag", "\"abc\"")]
            .into_iter()
            .collect();
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Content-Type", "ETag"]);
    }

    #[test]
    fn test_equality_ignores_name_case() {
        let a: Headers = [("Content-Type", "text/plain")].into_iter().collect();
        let b: Headers = [("content-type", "text/plain")].into_iter().collect();
        let c: Headers = [("content-type", "text/html")].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_list() {
        let tokens = split_list(" text/html ;; charset=utf-8 ; ", ';');
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("text/html"));
        assert!(tokens.contains("charset=utf-8"));
    }

    #[test]
    fn test_is_html() {
        assert!(html_resource("text/html").is_html());
        assert!(html_resource("text/html; charset=utf-8").is_html());
        assert!(!html_resource("text/plain").is_html());
        assert!(!html_resource("application/xhtml+xml").is_html());
    }

    #[test]
    fn test_missing_content_type_is_not_html() {
        let resource = Resource {
            status: 200,
            headers: Headers::new(),
            data: Vec::new(),
        };
        assert!(resource.content_types().is_empty());
        assert!(!resource.is_html());
    }
}
