//! HTTP fetchers for catalog pages and work files
//!
//! This module handles all HTTP traffic:
//! - Building the HTTP client
//! - Catalog page fetches with a fixed-delay retry loop on HTTP 429
//! - Work file fetches with a per-attempt deadline, a shared recoverable
//!   path for 429 and timeout, and chunked streaming to the output store

use crate::config::{Config, FileFormat};
use crate::crawler::parser::{extract_works, WorkRef};
use crate::crawler::retry::RetryPolicy;
use crate::storage::OutputStore;
use crate::url::{build_file_url, build_page_url};
use crate::GrabError;
use reqwest::{header, Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Cache behavior for one request
///
/// Tag searches use the default policy; crawl-run page fetches bypass
/// intermediaries because catalog contents can change between runs. The
/// cache-busting `v` query value is applied regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Let intermediaries serve cached responses
    Default,

    /// Ask intermediaries to revalidate (`Cache-Control: no-cache`)
    Bypass,
}

impl CachePolicy {
    fn apply(self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            CachePolicy::Default => request,
            CachePolicy::Bypass => request.header(header::CACHE_CONTROL, "no-cache"),
        }
    }
}

/// Builds the HTTP client shared by all fetches
///
/// No client-wide timeout is set; the file fetcher applies its own
/// per-attempt deadline and catalog fetches wait as long as the server takes.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("ficgrab/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues catalog page and work file requests with retry handling
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    catalog_host: String,
    download_host: String,
    page_retry: RetryPolicy,
    file_retry: RetryPolicy,
    request_timeout: Duration,
}

impl Fetcher {
    /// Builds a fetcher from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, GrabError> {
        Ok(Fetcher {
            client: build_http_client()?,
            catalog_host: config.archive.catalog_host.clone(),
            download_host: config.archive.download_host.clone(),
            page_retry: RetryPolicy {
                delay: Duration::from_millis(config.retry.page_delay_ms),
                max_attempts: config.retry.max_attempts,
            },
            file_retry: RetryPolicy {
                delay: Duration::from_millis(config.retry.file_delay_ms),
                max_attempts: config.retry.max_attempts,
            },
            request_timeout: Duration::from_millis(config.retry.request_timeout_ms),
        })
    }

    /// Fetches one catalog page and returns the works it references
    ///
    /// On HTTP 429 the same URL is retried after the page retry delay, per
    /// policy. Every other status is treated as a catalog response: the body
    /// is parsed and the result returned, possibly empty. End-of-catalog is
    /// inferred by the caller from an empty result, never from a status code.
    pub async fn fetch_page(
        &self,
        tag: &str,
        page: u32,
        cache: CachePolicy,
    ) -> Result<Vec<WorkRef>, GrabError> {
        let url = build_page_url(&self.catalog_host, tag, page)?;
        let mut attempts = 0u32;

        loop {
            let response = cache
                .apply(self.client.get(url.clone()))
                .send()
                .await
                .map_err(|source| GrabError::Http {
                    url: url.to_string(),
                    source,
                })?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;
                if self.page_retry.is_exhausted(attempts) {
                    return Err(GrabError::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                    });
                }
                tracing::warn!(
                    "Rate limited fetching page {} of '{}', backing off {:?}",
                    page,
                    tag,
                    self.page_retry.delay
                );
                tokio::time::sleep(self.page_retry.delay).await;
                continue;
            }

            let body = response.text().await.map_err(|source| GrabError::Http {
                url: url.to_string(),
                source,
            })?;
            return Ok(extract_works(&body));
        }
    }

    /// Downloads one work file into `dir` through the output store
    ///
    /// Each attempt races the request against the configured deadline; an
    /// expired deadline abandons the attempt (the in-flight request is not
    /// cancelled) and shares the recoverable path with HTTP 429: log, sleep
    /// the file retry delay, re-issue with a fresh cache buster. On 200 the
    /// body is streamed chunk-by-chunk into the created file. Any other
    /// status and any transport error abort the download.
    pub async fn fetch_work(
        &self,
        store: &dyn OutputStore,
        dir: &Path,
        filename: &str,
        id: &str,
        format: FileFormat,
        cache: CachePolicy,
    ) -> Result<(), GrabError> {
        let mut attempts = 0u32;

        loop {
            // Fresh cache buster per attempt
            let url = build_file_url(&self.download_host, id, format)?;
            let send = cache.apply(self.client.get(url.clone())).send();

            match tokio::time::timeout(self.request_timeout, send).await {
                Err(_elapsed) => {
                    attempts += 1;
                    if self.file_retry.is_exhausted(attempts) {
                        return Err(GrabError::Timeout {
                            url: url.to_string(),
                        });
                    }
                    tracing::warn!(
                        "{}: no response within {:?}, backing off {:?}",
                        id,
                        self.request_timeout,
                        self.file_retry.delay
                    );
                }
                Ok(Err(source)) => {
                    return Err(GrabError::Http {
                        url: url.to_string(),
                        source,
                    });
                }
                Ok(Ok(response)) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    attempts += 1;
                    if self.file_retry.is_exhausted(attempts) {
                        return Err(GrabError::RetriesExhausted {
                            url: url.to_string(),
                            attempts,
                        });
                    }
                    tracing::warn!(
                        "{}: rate limited, backing off {:?}",
                        id,
                        self.file_retry.delay
                    );
                }
                Ok(Ok(response)) if response.status() == StatusCode::OK => {
                    let file = store.create_file(dir, filename)?;
                    tracing::info!("Saving {}", filename);
                    return stream_to_file(response, file, &url).await;
                }
                Ok(Ok(response)) => {
                    return Err(GrabError::UnexpectedStatus {
                        url: url.to_string(),
                        status: response.status().as_u16(),
                    });
                }
            }

            tokio::time::sleep(self.file_retry.delay).await;
        }
    }
}

/// Streams a response body into a file chunk by chunk
///
/// The file is only flushed and closed after the source signals completion,
/// so the whole body is never buffered in memory.
async fn stream_to_file(
    mut response: reqwest::Response,
    file: std::fs::File,
    url: &url::Url,
) -> Result<(), GrabError> {
    let mut file = tokio::fs::File::from_std(file);

    while let Some(chunk) = response.chunk().await.map_err(|source| GrabError::Http {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
