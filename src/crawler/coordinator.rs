//! Crawl coordinator - tag search and download orchestration
//!
//! This module drives the two user-facing operations:
//! - `search`: probe page 1 of a candidate tag and select it if non-empty
//! - `download`: crawl the selected tag page by page, fanning out every
//!   work download on a page concurrently and joining before the next page
//!
//! Both operations are guarded by a single session state: at most one of
//! them runs at a time, and a second trigger is refused, not queued.

use crate::config::{Config, FileFormat};
use crate::crawler::fetcher::{CachePolicy, Fetcher};
use crate::output::CrawlSummary;
use crate::state::SessionState;
use crate::storage::{FsStore, OutputStore};
use crate::url::sanitize_component;
use crate::GrabError;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

/// Coordinates tag searches and crawl runs
pub struct Coordinator {
    fetcher: Fetcher,
    store: Option<Arc<dyn OutputStore>>,
    file_format: FileFormat,
    start_page: u32,
    session: Mutex<SessionState>,
    selected_tag: Mutex<Option<String>>,
}

/// Resets the session to `Idle` when an operation exits, on every path
#[derive(Debug)]
struct SessionGuard<'a> {
    session: &'a Mutex<SessionState>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        *self.session.lock().unwrap() = SessionState::Idle;
    }
}

impl Coordinator {
    /// Creates a coordinator from the loaded configuration
    ///
    /// The output store is opened eagerly when `output-root` is configured;
    /// without it, searches still work and only `download` is refused.
    pub fn new(config: &Config) -> Result<Self, GrabError> {
        let store: Option<Arc<dyn OutputStore>> = match &config.download.output_root {
            Some(root) => Some(Arc::new(FsStore::new(root)?)),
            None => None,
        };

        Ok(Coordinator {
            fetcher: Fetcher::from_config(config)?,
            store,
            file_format: config.download.file_format,
            start_page: config.download.start_page,
            session: Mutex::new(SessionState::Idle),
            selected_tag: Mutex::new(None),
        })
    }

    /// Returns the current session state
    pub fn session_state(&self) -> SessionState {
        *self.session.lock().unwrap()
    }

    /// Returns the currently selected tag, if any
    pub fn selected_tag(&self) -> Option<String> {
        self.selected_tag.lock().unwrap().clone()
    }

    /// Moves the session from `Idle` into `next`, refusing if busy
    fn begin(&self, next: SessionState) -> Result<SessionGuard<'_>, GrabError> {
        let mut state = self.session.lock().unwrap();
        if !state.is_idle() {
            return Err(GrabError::Busy { active: *state });
        }
        *state = next;
        Ok(SessionGuard {
            session: &self.session,
        })
    }

    /// Searches for a tag by probing page 1 of its catalog
    ///
    /// Returns `Ok(true)` and selects the tag if the page lists any works;
    /// `Ok(false)` leaves any previous selection unchanged. Refused with
    /// `GrabError::Busy` (zero network activity) while another operation is
    /// active.
    pub async fn search(&self, tag: &str) -> Result<bool, GrabError> {
        let _guard = self.begin(SessionState::Searching)?;

        tracing::info!("Searching for '{}'", tag);
        let works = self.fetcher.fetch_page(tag, 1, CachePolicy::Default).await?;

        if works.is_empty() {
            tracing::info!("Tag '{}' not found", tag);
            return Ok(false);
        }

        tracing::info!("Found tag '{}' ({} works on page 1)", tag, works.len());
        *self.selected_tag.lock().unwrap() = Some(tag.to_string());
        Ok(true)
    }

    /// Runs one full crawl of the selected tag
    ///
    /// Pages are visited strictly in order from the configured start page,
    /// one at a time; a page's downloads all run concurrently and are joined
    /// before the next page is fetched, so in-flight work is bounded by one
    /// page's size. The loop ends on the first empty page. Any error aborts
    /// the run, releases the session, and produces no summary.
    pub async fn download(&self) -> Result<CrawlSummary, GrabError> {
        let _guard = self.begin(SessionState::Downloading)?;

        let tag = self
            .selected_tag
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| GrabError::Precondition("no tag selected; search first".to_string()))?;
        let store = self
            .store
            .clone()
            .ok_or_else(|| GrabError::Precondition("no output-root configured".to_string()))?;

        let dir_name = format!("{}_{}", sanitize_component(&tag), self.file_format);
        let dir = store.create_subdir(&dir_name)?;

        let mut summary = CrawlSummary::default();
        let mut page = self.start_page;

        loop {
            let works = self.fetcher.fetch_page(&tag, page, CachePolicy::Bypass).await?;
            summary.record_visit();
            if works.is_empty() {
                tracing::info!("Reached last page: {}", page);
                break;
            }

            tracing::info!("Downloading page {} ({} works)", page, works.len());

            let mut tasks: JoinSet<Result<(), GrabError>> = JoinSet::new();
            for work in works {
                let fetcher = self.fetcher.clone();
                let store = Arc::clone(&store);
                let dir = dir.clone();
                let format = self.file_format;
                let filename = format!(
                    "{}_{}.{}",
                    sanitize_component(&work.title),
                    work.id,
                    format.extension()
                );

                tasks.spawn(async move {
                    fetcher
                        .fetch_work(
                            store.as_ref(),
                            &dir,
                            &filename,
                            &work.id,
                            format,
                            CachePolicy::Bypass,
                        )
                        .await
                });
            }

            // Join barrier: every download on this page finishes (or the
            // first error aborts the run) before the next page is fetched.
            let count = tasks.len();
            while let Some(joined) = tasks.join_next().await {
                joined??;
            }

            summary.record_downloads(count);
            page += 1;
        }

        tracing::info!("{}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(output_root: Option<String>) -> Config {
        let mut config: Config = toml::from_str(
            r#"
[archive]
catalog-host = "http://127.0.0.1:1"
download-host = "http://127.0.0.1:1"

[download]
file-format = "pdf"
"#,
        )
        .unwrap();
        config.download.output_root = output_root;
        config
    }

    #[test]
    fn test_new_coordinator_is_idle() {
        let coordinator = Coordinator::new(&test_config(None)).unwrap();
        assert_eq!(coordinator.session_state(), SessionState::Idle);
        assert_eq!(coordinator.selected_tag(), None);
    }

    #[tokio::test]
    async fn test_download_without_tag_is_refused_before_io() {
        // No tag selected and no output root: the precondition check fires
        // before any network or filesystem activity.
        let coordinator = Coordinator::new(&test_config(None)).unwrap();
        let result = coordinator.download().await;
        assert!(matches!(result.unwrap_err(), GrabError::Precondition(_)));
        assert_eq!(coordinator.session_state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_download_without_output_root_is_refused() {
        let coordinator = Coordinator::new(&test_config(None)).unwrap();
        *coordinator.selected_tag.lock().unwrap() = Some("Fluff".to_string());

        let result = coordinator.download().await;
        assert!(matches!(result.unwrap_err(), GrabError::Precondition(_)));
        assert_eq!(coordinator.session_state(), SessionState::Idle);
    }

    #[test]
    fn test_begin_refuses_while_busy() {
        let coordinator = Coordinator::new(&test_config(None)).unwrap();

        let guard = coordinator.begin(SessionState::Searching).unwrap();
        assert_eq!(coordinator.session_state(), SessionState::Searching);

        let refused = coordinator.begin(SessionState::Downloading);
        assert!(matches!(
            refused.unwrap_err(),
            GrabError::Busy {
                active: SessionState::Searching
            }
        ));

        drop(guard);
        assert_eq!(coordinator.session_state(), SessionState::Idle);
    }
}
