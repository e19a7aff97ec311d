//! Configuration module for Sumi-Cache
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Configuration is optional; without a file the scraper runs on
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use sumi_cache::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Scraper will identify as: {}", config.fetch.user_agent);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, OutputConfig, DEFAULT_DATABASE_PATH};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
