//! Ficgrab main entry point
//!
//! Command-line interface for the ficgrab tag-catalog downloader.

use clap::Parser;
use ficgrab::config::load_config_with_hash;
use ficgrab::crawler::run_crawl;
use ficgrab::output::print_summary;
use ficgrab::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ficgrab: a tag-catalog crawler and downloader
///
/// Ficgrab searches a work archive for a tag, then crawls the tag's catalog
/// page by page, downloading one file per work while respecting the
/// server's rate limiting.
#[derive(Parser, Debug)]
#[command(name = "ficgrab")]
#[command(version = "1.0.0")]
#[command(about = "A tag-catalog crawler and downloader", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Tag to search for and download
    #[arg(value_name = "TAG")]
    tag: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Only verify the tag exists; do not download anything
    #[arg(long, conflicts_with = "dry_run")]
    search_only: bool,

    /// Validate config and show what would be crawled without any network activity
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    let _ = config_hash;

    if cli.dry_run {
        handle_dry_run(&config, &cli.tag);
        return Ok(());
    }

    if cli.search_only {
        handle_search(&config, &cli.tag).await
    } else {
        handle_crawl(&config, &cli.tag).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ficgrab=info,warn"),
            1 => EnvFilter::new("ficgrab=debug,info"),
            2 => EnvFilter::new("ficgrab=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &ficgrab::Config, tag: &str) {
    println!("=== Ficgrab Dry Run ===\n");

    println!("Archive:");
    println!("  Catalog host:  {}", config.archive.catalog_host);
    println!("  Download host: {}", config.archive.download_host);

    println!("\nDownload:");
    println!("  Tag:         {}", tag);
    println!("  File format: {}", config.download.file_format);
    println!("  Start page:  {}", config.download.start_page);
    println!(
        "  Output root: {}",
        config
            .download
            .output_root
            .as_deref()
            .unwrap_or("(not set - downloads will be refused)")
    );

    println!("\nRetry:");
    println!("  Page delay:      {}ms", config.retry.page_delay_ms);
    println!("  File delay:      {}ms", config.retry.file_delay_ms);
    println!("  Request timeout: {}ms", config.retry.request_timeout_ms);
    match config.retry.max_attempts {
        Some(max) => println!("  Max attempts:    {}", max),
        None => println!("  Max attempts:    unbounded"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --search-only mode: verifies the tag exists and exits
async fn handle_search(config: &ficgrab::Config, tag: &str) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;

    if coordinator.search(tag).await? {
        println!("✓ Tag found: {}", tag);
        Ok(())
    } else {
        println!("✗ Tag not found: {}", tag);
        anyhow::bail!("tag '{}' not found", tag)
    }
}

/// Handles the main search-then-download flow
async fn handle_crawl(config: &ficgrab::Config, tag: &str) -> anyhow::Result<()> {
    match run_crawl(config, tag).await {
        Ok(Some(summary)) => {
            print_summary(&summary);
            Ok(())
        }
        Ok(None) => {
            println!("✗ Tag not found: {}", tag);
            anyhow::bail!("tag '{}' not found", tag)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
