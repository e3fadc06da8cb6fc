use serde::Deserialize;
use std::fmt;

/// Main configuration structure for ficgrab
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub download: DownloadConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Remote archive endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Host serving the paginated tag catalog
    #[serde(rename = "catalog-host")]
    pub catalog_host: String,

    /// Host serving per-work file downloads
    #[serde(rename = "download-host")]
    pub download_host: String,
}

/// Download behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// File format to request for every work
    #[serde(rename = "file-format")]
    pub file_format: FileFormat,

    /// Catalog page number to start crawling from (1-based)
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Root directory for downloaded files; downloads are refused without it
    #[serde(rename = "output-root", default)]
    pub output_root: Option<String>,
}

/// Retry and deadline configuration
///
/// The defaults mirror the archive's observed behavior: a 20 second pause
/// after a rate-limited catalog request, a 30 second pause after a
/// rate-limited or timed-out file request, and a 5 second per-attempt
/// deadline on file requests. `max-attempts` is absent by default, which
/// means retrying forever.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Delay before retrying a rate-limited catalog page fetch (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Delay before retrying a failed file fetch (milliseconds)
    #[serde(rename = "file-delay-ms", default = "default_file_delay_ms")]
    pub file_delay_ms: u64,

    /// Per-attempt deadline for file requests (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional ceiling on attempts per request; absent = unbounded
    #[serde(rename = "max-attempts", default)]
    pub max_attempts: Option<u32>,
}

fn default_start_page() -> u32 {
    1
}

fn default_page_delay_ms() -> u64 {
    20_000
}

fn default_file_delay_ms() -> u64 {
    30_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            page_delay_ms: default_page_delay_ms(),
            file_delay_ms: default_file_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_attempts: None,
        }
    }
}

/// File formats offered by the archive's download endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Epub,
    Mobi,
    Html,
    Azw3,
}

impl FileFormat {
    /// Returns the extension used in both the request URL and the output filename
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Epub => "epub",
            Self::Mobi => "mobi",
            Self::Html => "html",
            Self::Azw3 => "azw3",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
