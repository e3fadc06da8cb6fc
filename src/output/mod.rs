//! Crawl run reporting
//!
//! This module holds the summary produced at the end of a crawl run and
//! its human-readable rendering.

mod summary;

pub use summary::{print_summary, CrawlSummary};
