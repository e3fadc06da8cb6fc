//! Crawler module for catalog crawling and work downloading
//!
//! This module contains the core crawl logic, including:
//! - HTTP fetching with rate-limit retry and per-attempt deadlines
//! - Catalog page parsing and work extraction
//! - Crawl coordination and session exclusion

mod coordinator;
mod fetcher;
mod parser;
mod retry;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, CachePolicy, Fetcher};
pub use parser::{extract_works, WorkRef};
pub use retry::RetryPolicy;

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::GrabError;

/// Runs a tag search followed by a full crawl of that tag
///
/// This is the main entry point for the CLI flow: the tag is probed first
/// (page 1, default cache policy) and the download only starts if the
/// search found it. Returns `Ok(None)` when the tag does not exist.
pub async fn run_crawl(config: &Config, tag: &str) -> Result<Option<CrawlSummary>, GrabError> {
    let coordinator = Coordinator::new(config)?;

    if !coordinator.search(tag).await? {
        return Ok(None);
    }

    coordinator.download().await.map(Some)
}
