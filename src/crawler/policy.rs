//! Scope policy for the crawl
//!
//! The policy keeps the crawl on the root's host and off non-HTTP schemes.
//! There is no path prefix or depth limit.

use crate::url::Url;

/// Schemes the crawler is willing to fetch
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Heuristics for limiting the scope of the scraper
#[derive(Debug, Clone)]
pub struct ScrapePolicy {
    root: Url,
}

impl ScrapePolicy {
    pub fn new(root: Url) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Returns true if `url` is on the root's host and uses http or https
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_cache::crawler::ScrapePolicy;
    /// use sumi_cache::Url;
    ///
    /// let policy = ScrapePolicy::new(Url::parse("http://example.com/").unwrap());
    /// assert!(policy.should_scrape(&Url::parse("https://example.com/about").unwrap()));
    /// assert!(!policy.should_scrape(&Url::parse("http://other.com/").unwrap()));
    /// ```
    pub fn should_scrape(&self, url: &Url) -> bool {
        if url.uri.host != self.root.uri.host {
            return false;
        }
        ALLOWED_SCHEMES.contains(&url.scheme.as_str())
    }
}
