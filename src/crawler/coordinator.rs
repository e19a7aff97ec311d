//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop. Each round:
//! 1. Walks the current frontier in sorted order
//! 2. Fetches each URL through the [`FetchCache`]
//! 3. Extracts links and resolves them against the root URL
//! 4. Keeps links that pass the [`ScrapePolicy`]
//! 5. Marks the URL visited
//!
//! The next frontier is everything collected in the round minus the visited
//! set. The crawl ends when that is empty.

use crate::config::Config;
use crate::crawler::cache::FetchCache;
use crate::crawler::fetcher::{HttpTransport, Transport};
use crate::crawler::parser::extract_links;
use crate::crawler::policy::ScrapePolicy;
use crate::resource::Resource;
use crate::storage::{open_storage, SqliteStorage, Storage};
use crate::url::Url;
use crate::ScrapeError;
use std::collections::BTreeSet;
use std::path::Path;

/// Main crawler coordinator structure
pub struct Coordinator<S, T> {
    cache: FetchCache<S, T>,
    policy: ScrapePolicy,
}

impl<S: Storage, T: Transport> Coordinator<S, T> {
    /// Creates a coordinator that crawls from `root` through `cache`
    pub fn new(root: Url, cache: FetchCache<S, T>) -> Self {
        Self {
            cache,
            policy: ScrapePolicy::new(root),
        }
    }

    pub fn root(&self) -> &Url {
        self.policy.root()
    }

    /// Runs the crawl to completion and returns the visited set
    ///
    /// Any URL, transport or storage error aborts the run; there is no
    /// per-URL retry or skip.
    pub async fn run(&mut self) -> Result<BTreeSet<Url>, ScrapeError> {
        let mut visited: BTreeSet<Url> = BTreeSet::new();
        let mut frontier: BTreeSet<Url> = BTreeSet::from([self.root().clone()]);
        let mut round = 0usize;

        tracing::info!("Starting crawl from {}", self.root());

        while !frontier.is_empty() {
            round += 1;
            tracing::debug!("Round {}: {} URLs in frontier", round, frontier.len());

            let mut discovered = BTreeSet::new();
            for url in &frontier {
                let resource = self.cache.fetch(url).await?;
                discovered.extend(self.links_from(&resource));
                visited.insert(url.clone());
            }

            frontier = discovered
                .into_iter()
                .filter(|url| !visited.contains(url))
                .collect();
        }

        tracing::info!(
            "Crawl completed: {} URLs visited in {} rounds",
            visited.len(),
            round
        );

        Ok(visited)
    }

    /// Resolves the links of `resource` against the root and applies the
    /// scope policy
    ///
    /// Links are resolved relative to the crawl root, not to the page they
    /// were found on. Hrefs that cannot be resolved are logged and dropped.
    fn links_from(&self, resource: &Resource) -> BTreeSet<Url> {
        let mut links = BTreeSet::new();

        for href in extract_links(resource) {
            let link = match self.root().join(&href) {
                Ok(link) => link,
                Err(e) => {
                    tracing::warn!("Skipping unresolvable link {:?}: {}", href, e);
                    continue;
                }
            };

            if self.policy.should_scrape(&link) {
                links.insert(link);
            } else {
                tracing::trace!("Out of scope: {}", link);
            }
        }

        links
    }
}

/// Runs a complete crawl of `root` against the store at `database`
///
/// This function orchestrates the whole scrape:
///
/// 1. Open (or create) the store
/// 2. Build the HTTP transport from configuration
/// 3. Crawl breadth-first until the frontier is empty
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `database` - Path to the SQLite store
/// * `root` - The URL to start from
///
/// # Returns
///
/// * `Ok(BTreeSet<Url>)` - Every URL visited in this run
/// * `Err(ScrapeError)` - Crawl failed
pub async fn run_crawl(
    config: &Config,
    database: &Path,
    root: Url,
) -> Result<BTreeSet<Url>, ScrapeError> {
    let storage: SqliteStorage = open_storage(database)?;
    let transport = HttpTransport::from_config(&config.fetch).map_err(|e| {
        ScrapeError::Transport {
            url: root.to_string(),
            source: e.into(),
        }
    })?;
    let cache = FetchCache::new(storage, transport, config.fetch.user_agent.as_str());

    let mut coordinator = Coordinator::new(root, cache);
    coordinator.run().await
}
