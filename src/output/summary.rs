//! Crawl run summary

use std::fmt;

/// Totals for one completed crawl run
///
/// Produced exactly once, when the page loop terminates on an empty page.
/// An aborted run produces no summary. The final empty page counts as
/// visited: a catalog of two listing pages reports three visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Number of catalog pages fetched, including the final empty one
    pub pages_visited: u32,

    /// Number of work files downloaded across all pages
    pub works_downloaded: u64,
}

impl CrawlSummary {
    /// Records one catalog page fetch
    pub fn record_visit(&mut self) {
        self.pages_visited += 1;
    }

    /// Records `count` completed downloads from one page
    pub fn record_downloads(&mut self, count: usize) {
        self.works_downloaded += count as u64;
    }
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages visited: {}, works downloaded: {}",
            self.pages_visited, self.works_downloaded
        )
    }
}

/// Prints a completed run's summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===");
    println!("  Pages visited:    {}", summary.pages_visited);
    println!("  Works downloaded: {}", summary.works_downloaded);
}
