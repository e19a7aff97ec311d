//! Crawler module for web page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP transport and client construction
//! - The get-or-fetch cache over the resource store
//! - HTML link extraction
//! - Scope policy and breadth-first crawl coordination

mod cache;
mod coordinator;
mod fetcher;
mod parser;
mod policy;

pub use cache::FetchCache;
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{
    build_http_client, HttpTransport, Transport, TransportError, TransportResponse,
    DEFAULT_USER_AGENT,
};
pub use parser::{extract_hrefs, extract_links};
pub use policy::{ScrapePolicy, ALLOWED_SCHEMES};

use crate::config::Config;
use crate::url::Url;
use crate::ScrapeError;
use std::collections::BTreeSet;
use std::path::Path;

/// Scrapes everything reachable from `root` into the store at `database`
///
/// This is the main entry point for starting a scrape. It will:
/// 1. Open or create the store
/// 2. Build the HTTP client
/// 3. Fetch pages, answering repeats from the store
/// 4. Extract and follow in-scope links until none are new
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `database` - Path to the SQLite store
/// * `root` - The URL the crawl starts from
///
/// # Returns
///
/// * `Ok(BTreeSet<Url>)` - The visited URLs
/// * `Err(ScrapeError)` - Scrape failed
pub async fn scrape(
    config: &Config,
    database: &Path,
    root: Url,
) -> Result<BTreeSet<Url>, ScrapeError> {
    run_crawl(config, database, root).await
}
