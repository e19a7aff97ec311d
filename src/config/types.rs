use crate::crawler::DEFAULT_USER_AGENT;
use serde::Deserialize;

/// Default location of the resource store
pub const DEFAULT_DATABASE_PATH: &str = "scraper.db";

/// Main configuration structure for Sumi-Cache
///
/// Every table is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Live request configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent with every live request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds; unset means wait indefinitely
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file, used when `--database` is not given
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}
