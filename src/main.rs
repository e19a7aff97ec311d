//! Sumi-Cache main entry point
//!
//! This is the command-line interface for the Sumi-Cache scraper.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use sumi_cache::config::{load_config_with_hash, Config};
use sumi_cache::storage::{SqliteStorage, Storage};
use sumi_cache::{crawler, export, Headers, Resource, Url};
use tracing_subscriber::EnvFilter;

/// Sumi-Cache: a caching single-host web scraper
///
/// Sumi-Cache fetches every page reachable from a root URL on the same
/// host, keeps each response in a SQLite store, and never fetches the same
/// host and path twice.
#[derive(Parser, Debug)]
#[command(name = "sumi-cache")]
#[command(version = "1.0.0")]
#[command(about = "A caching single-host web scraper", long_about = None)]
struct Cli {
    /// Path to the SQLite store (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new database file
    Create {
        /// Delete any existing store first
        #[arg(long)]
        recreate: bool,

        /// Seed the store with a placeholder record for example.com
        #[arg(long)]
        testdata: bool,
    },

    /// Recursively fetch available HTTP resources
    Scrape {
        /// URL to start from
        root: String,
    },

    /// Export stored resources to the filesystem
    Export {
        /// Directory to write the tree into
        directory: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = load_settings(cli.config.as_deref())?;
    let database = cli
        .database
        .unwrap_or_else(|| PathBuf::from(&config.output.database_path));

    match command {
        Command::Create { recreate, testdata } => handle_create(&database, recreate, testdata),
        Command::Scrape { root } => handle_scrape(&config, &database, &root).await,
        Command::Export { directory } => handle_export(&database, &directory),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_cache=info,warn"),
            1 => EnvFilter::new("sumi_cache=debug,info"),
            2 => EnvFilter::new("sumi_cache=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_settings(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles `create`: initializes the store, optionally seeding test data
fn handle_create(database: &Path, recreate: bool, testdata: bool) -> anyhow::Result<()> {
    let mut storage = SqliteStorage::new(database);
    storage
        .create(recreate)
        .with_context(|| format!("Failed to create store at {}", database.display()))?;
    tracing::info!("Store ready at {}", database.display());

    if testdata {
        let url = Url::parse("example.com")?;
        let resource = Resource {
            status: 200,
            headers: [("Content-Type", "text/plain")].into_iter().collect::<Headers>(),
            data: Vec::new(),
        };
        storage.insert(&url, &resource)?;
        tracing::info!("Inserted test record for {}", url);
    }

    Ok(())
}

/// Handles `scrape`: crawls everything reachable from `root`
async fn handle_scrape(config: &Config, database: &Path, root: &str) -> anyhow::Result<()> {
    let root = Url::parse(root).with_context(|| format!("Invalid root URL {:?}", root))?;

    match crawler::scrape(config, database, root).await {
        Ok(visited) => {
            tracing::info!("Scrape completed successfully ({} URLs)", visited.len());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `export`: writes the store out as a directory tree
fn handle_export(database: &Path, directory: &Path) -> anyhow::Result<()> {
    let storage = SqliteStorage::new(database);
    let written = export::export(&storage, directory)
        .with_context(|| format!("Failed to export {}", database.display()))?;

    println!(
        "✓ Exported {} resources to: {}",
        written.len(),
        directory.display()
    );
    Ok(())
}
