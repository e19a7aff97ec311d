//! Sumi-Cache: a single-host caching web scraper
//!
//! This crate crawls every HTML page reachable from a root URL on the same
//! host, keeps each fetched resource in a SQLite store keyed by host and path,
//! and can replay that store onto a directory tree.

pub mod config;
pub mod crawler;
pub mod export;
pub mod resource;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Cache operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        source: crawler::TransportError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("No host in URL: {0:?}")]
    MissingHost(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Cache operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use resource::{Headers, Resource};
pub use url::{Uri, Url};
