// src/api/pagination.rs
//! Incremental walk over a paginated listing.
//!
//! A [`PaginationTracker`] owns the results gathered so far and the cursor
//! to the next page. Each successful [`advance`](PaginationTracker::advance)
//! appends the next page's results and moves the cursor forward. Failures
//! leave both untouched, so the same call can simply be repeated.

use super::types::QueryOptions;
use crate::algebras::{ContentSource, FetchError, PaginationError, PaginationState};
use crate::model::{PageResult, PostSummary};
use crate::types::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Accumulates listing pages by following next-page cursors.
pub struct PaginationTracker {
    source: Arc<dyn ContentSource>,
    results: Vec<PostSummary>,
    cursor: Option<Cursor>,
    in_flight: bool,
    fetch_timeout: Option<Duration>,
    pages_loaded: u32,
}

impl PaginationTracker {
    /// Wraps an already-fetched first page.
    pub fn new(source: Arc<dyn ContentSource>, first_page: PageResult) -> Self {
        Self {
            source,
            results: first_page.results,
            cursor: first_page.next_page,
            in_flight: false,
            fetch_timeout: None,
            pages_loaded: 1,
        }
    }

    /// Queries the first page of `doc_type` and wraps it.
    pub async fn start(
        source: Arc<dyn ContentSource>,
        doc_type: &str,
        options: &QueryOptions,
        fetch_timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let first_page = with_timeout(
            fetch_timeout,
            format!("query '{}' documents", doc_type),
            source.query_by_type(doc_type, options),
        )
        .await?;

        log::info!(
            "Loaded first page of '{}': {} results, more: {}",
            doc_type,
            first_page.results.len(),
            first_page.has_more()
        );

        Ok(Self::new(source, first_page).with_fetch_timeout(fetch_timeout))
    }

    /// Bounds every next-page fetch; `None` waits indefinitely.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn results(&self) -> &[PostSummary] {
        &self.results
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn state(&self) -> PaginationState {
        if self.in_flight {
            PaginationState::Fetching
        } else {
            PaginationState::from_cursor_presence(self.cursor.is_some())
        }
    }

    /// Fetches the page behind the current cursor and appends its results.
    ///
    /// Returns how many results were appended. Nothing changes unless the
    /// fetch succeeds; a dropped future leaves the tracker in `HasMore`.
    pub async fn advance(&mut self) -> Result<usize, PaginationError> {
        // Only `Exhausted` reaches this: `&mut self` already rules out a
        // second call while one is `Fetching`.
        let state = self.state();
        if !state.can_advance() {
            return Err(PaginationError::InvalidState { state });
        }
        let Some(cursor) = self.cursor.clone() else {
            return Err(PaginationError::InvalidState {
                state: PaginationState::Exhausted,
            });
        };

        log::debug!("Advancing pagination to {}", cursor);

        let page = {
            let _in_flight = InFlight::enter(&mut self.in_flight);
            with_timeout(
                self.fetch_timeout,
                format!("fetch page {}", cursor),
                self.source.fetch_page(&cursor),
            )
            .await
        };

        let page = match page {
            Ok(page) => page,
            Err(cause) => {
                log::warn!("Next page fetch failed, keeping current results: {}", cause);
                return Err(PaginationError::Fetch { cause });
            }
        };

        let appended = page.results.len();
        self.results.extend(page.results);
        self.cursor = page.next_page;
        self.pages_loaded += 1;

        log::debug!(
            "Appended {} results ({} total), state now: {}",
            appended,
            self.results.len(),
            self.state()
        );

        Ok(appended)
    }

    /// Advances until the last page or until `max_pages` pages are loaded.
    ///
    /// Returns the number of pages fetched by this call.
    pub async fn advance_until_exhausted(
        &mut self,
        max_pages: Option<u32>,
    ) -> Result<u32, PaginationError> {
        let mut fetched = 0u32;

        while self.has_more() {
            if let Some(max) = max_pages {
                if self.pages_loaded >= max {
                    log::debug!("Reached maximum page limit: {}", max);
                    break;
                }
            }
            self.advance().await?;
            fetched += 1;
        }

        Ok(fetched)
    }

    pub fn into_results(self) -> Vec<PostSummary> {
        self.results
    }
}

/// Marks a fetch as in flight for as long as it lives.
///
/// Dropping it, including when the owning future is cancelled, clears the
/// flag again.
struct InFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlight<'a> {
    fn enter(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

async fn with_timeout<T, F>(
    limit: Option<Duration>,
    operation: String,
    fetch: F,
) -> Result<T, FetchError>
where
    F: std::future::Future<Output = Result<T, FetchError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| FetchError::Timeout { operation })?,
        None => fetch.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::content::tests::MockContentSource;
    use crate::model::Document;
    use crate::types::DocumentUid;
    use pretty_assertions::assert_eq;

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: DocumentUid::parse(uid).unwrap(),
            first_publication_date: None,
            title: format!("Post {}", uid),
            subtitle: String::new(),
            author: "Danilo Vieira".to_string(),
        }
    }

    fn cursor(page: u32) -> Cursor {
        Cursor::parse(&format!(
            "https://blog.cdn.prismic.io/api/v2/documents/search?page={}",
            page
        ))
        .unwrap()
    }

    fn uids(tracker: &PaginationTracker) -> Vec<&str> {
        tracker.results().iter().map(|p| p.uid.as_str()).collect()
    }

    #[tokio::test]
    async fn advance_appends_and_moves_cursor() {
        let source = Arc::new(MockContentSource::new());
        source
            .add_page(
                &cursor(2),
                PageResult {
                    results: vec![summary("c"), summary("d")],
                    next_page: None,
                },
            )
            .await;

        let mut tracker = PaginationTracker::new(
            source,
            PageResult {
                results: vec![summary("a"), summary("b")],
                next_page: Some(cursor(2)),
            },
        );
        assert!(tracker.has_more());
        assert_eq!(tracker.state(), PaginationState::HasMore);

        let appended = tracker.advance().await.unwrap();

        assert_eq!(appended, 2);
        assert_eq!(uids(&tracker), vec!["a", "b", "c", "d"]);
        assert!(!tracker.has_more());
        assert_eq!(tracker.state(), PaginationState::Exhausted);
        assert_eq!(tracker.pages_loaded(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched() {
        // No page registered behind cursor(2): the mock reports NotFound.
        let source = Arc::new(MockContentSource::new());
        let mut tracker = PaginationTracker::new(
            source.clone(),
            PageResult {
                results: vec![summary("a"), summary("b")],
                next_page: Some(cursor(2)),
            },
        );

        let err = tracker.advance().await.unwrap_err();

        assert!(matches!(err, PaginationError::Fetch { .. }));
        assert_eq!(uids(&tracker), vec!["a", "b"]);
        assert_eq!(tracker.cursor(), Some(&cursor(2)));
        assert_eq!(tracker.state(), PaginationState::HasMore);

        // The same call succeeds once the page is reachable.
        source
            .add_page(
                &cursor(2),
                PageResult {
                    results: vec![summary("c")],
                    next_page: None,
                },
            )
            .await;
        tracker.advance().await.unwrap();
        assert_eq!(uids(&tracker), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn exhausted_tracker_rejects_advance() {
        let source = Arc::new(MockContentSource::new());
        let mut tracker = PaginationTracker::new(
            source,
            PageResult {
                results: vec![summary("a")],
                next_page: None,
            },
        );

        assert_eq!(tracker.state(), PaginationState::Exhausted);
        let err = tracker.advance().await.unwrap_err();
        assert_eq!(
            err,
            PaginationError::InvalidState {
                state: PaginationState::Exhausted
            }
        );
        assert_eq!(uids(&tracker), vec!["a"]);
    }

    #[tokio::test]
    async fn advance_until_exhausted_follows_every_cursor() {
        let source = Arc::new(MockContentSource::new());
        source
            .add_first_page(PageResult {
                results: vec![summary("a")],
                next_page: Some(cursor(2)),
            })
            .await;
        source
            .add_page(
                &cursor(2),
                PageResult {
                    results: vec![summary("b")],
                    next_page: Some(cursor(3)),
                },
            )
            .await;
        source
            .add_page(
                &cursor(3),
                PageResult {
                    results: vec![summary("c")],
                    next_page: None,
                },
            )
            .await;

        let mut tracker =
            PaginationTracker::start(source, "posts", &QueryOptions::default(), None)
                .await
                .unwrap();
        let fetched = tracker.advance_until_exhausted(None).await.unwrap();

        assert_eq!(fetched, 2);
        assert_eq!(uids(&tracker), vec!["a", "b", "c"]);
        assert!(!tracker.has_more());
    }

    #[tokio::test]
    async fn advance_until_exhausted_respects_page_limit() {
        let source = Arc::new(MockContentSource::new());
        source
            .add_page(
                &cursor(2),
                PageResult {
                    results: vec![summary("b")],
                    next_page: Some(cursor(3)),
                },
            )
            .await;

        let mut tracker = PaginationTracker::new(
            source,
            PageResult {
                results: vec![summary("a")],
                next_page: Some(cursor(2)),
            },
        );
        let fetched = tracker.advance_until_exhausted(Some(2)).await.unwrap();

        assert_eq!(fetched, 1);
        assert_eq!(tracker.pages_loaded(), 2);
        assert!(tracker.has_more());
    }

    /// A source whose next-page fetch never completes.
    struct StalledSource;

    #[async_trait::async_trait]
    impl ContentSource for StalledSource {
        async fn query_by_type(
            &self,
            _doc_type: &str,
            _options: &QueryOptions,
        ) -> Result<PageResult, FetchError> {
            futures::future::pending().await
        }

        async fn get_by_uid(
            &self,
            _doc_type: &str,
            _uid: &DocumentUid,
        ) -> Result<Document, FetchError> {
            futures::future::pending().await
        }

        async fn fetch_page(&self, _cursor: &Cursor) -> Result<PageResult, FetchError> {
            futures::future::pending().await
        }
    }

    fn stalled_tracker() -> PaginationTracker {
        PaginationTracker::new(
            Arc::new(StalledSource),
            PageResult {
                results: vec![summary("a")],
                next_page: Some(cursor(2)),
            },
        )
    }

    #[tokio::test]
    async fn fetch_timeout_fails_without_mutation() {
        let mut tracker = stalled_tracker().with_fetch_timeout(Some(Duration::from_millis(20)));

        let err = tracker.advance().await.unwrap_err();

        match err {
            PaginationError::Fetch {
                cause: FetchError::Timeout { operation },
            } => assert!(operation.contains("page=2")),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(uids(&tracker), vec!["a"]);
        assert_eq!(tracker.state(), PaginationState::HasMore);
    }

    #[tokio::test]
    async fn dropped_advance_discards_the_fetch() {
        let mut tracker = stalled_tracker();

        // Simulates the owning view going away while the fetch is pending.
        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), tracker.advance()).await;
        assert!(abandoned.is_err());

        assert_eq!(tracker.state(), PaginationState::HasMore);
        assert_eq!(uids(&tracker), vec!["a"]);
        assert_eq!(tracker.cursor(), Some(&cursor(2)));
    }
}
