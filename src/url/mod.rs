//! URL model for Sumi-Cache
//!
//! This module provides the canonical URL representation used for caching and
//! scoping, together with parsing, normalization and relative resolution.
//!
//! Identity is split in two layers:
//! - [`Uri`] (host + path) is the storage key
//! - [`Url`] (scheme + uri + query + fragment) is the crawl identity

mod normalize;
mod parse;
mod resolve;

use std::fmt;

// Re-export main functions
pub use normalize::{normalize, DEFAULT_PATH, DEFAULT_SCHEME};
pub use parse::{parse, RawUrl};
pub use resolve::resolve;

/// Identifier for a stored resource: host and path
///
/// The host keeps any explicit port (`localhost:8080`). The path is never
/// empty once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri {
    pub host: String,
    pub path: String,
}

/// A normalized URL
///
/// Equality and hashing cover all four fields, so `/a?x=1` and `/a?x=2` are
/// different URLs even though they share a [`Uri`]. The derived ordering
/// (scheme, host, path, query, fragment) only serves to give the crawl a
/// deterministic processing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Url {
    pub scheme: String,
    pub uri: Uri,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Url {
    /// Parses and normalizes `text`; see [`parse`]
    pub fn parse(text: &str) -> crate::UrlResult<Self> {
        parse(text)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.uri.host, self.uri.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_display_roundtrip() {
        for text in [
            "http://example.com/",
            "https://example.com/a/b?x=1",
            "http://example.com/a#top",
            "http://localhost:8080/docs/?q=#",
        ] {
            assert_eq!(Url::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_query_participates_in_identity() {
        let a = Url::parse("http://example.com/a?x=1").unwrap();
        let b = Url::parse("http://example.com/a?x=2").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.uri, b.uri);

        let set: HashSet<Url> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_fragment_participates_in_identity() {
        let a = Url::parse("http://example.com/a").unwrap();
        let b = Url::parse("http://example.com/a#top").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let urls: BTreeSet<Url> = [
            "http://example.com/c",
            "http://example.com/a?x=2",
            "http://example.com/a",
            "http://example.com/a?x=1",
        ]
        .into_iter()
        .map(|u| Url::parse(u).unwrap())
        .collect();

        let ordered: Vec<String> = urls.iter().map(Url::to_string).collect();
        assert_eq!(
            ordered,
            vec![
                "http://example.com/a",
                "http://example.com/a?x=1",
                "http://example.com/a?x=2",
                "http://example.com/c",
            ]
        );
    }

    #[test]
    fn test_uri_display() {
        let url = Url::parse("https://example.com/docs/?q=1").unwrap();
        assert_eq!(url.uri.to_string(), "example.com/docs/");
    }
}
