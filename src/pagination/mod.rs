//! Cursor-based pagination accumulator for "load more" listings
//!
//! The listing view seeds a [`PaginationState`] from the first page of
//! results and advances it with [`PaginationState::fetch_next`] each time
//! the reader asks for more. Every transition returns a new state value;
//! nothing is mutated in place, so the contract is unit-testable without
//! a rendering environment.

use crate::content::{PageFetcher, Post, PostPage, SourceError};

/// Accumulated listing state for one page view.
///
/// Results keep fetch order and are never de-duplicated; if the source
/// repeats a document across pages, it shows up twice.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// All posts seen so far, in fetch order
    pub results: Vec<Post>,

    /// Cursor for the following page; `None` or empty means exhausted
    pub next_cursor: Option<String>,
}

impl PaginationState {
    /// Seed the state from the initial page of results
    pub fn initialize(page: PostPage) -> Self {
        Self {
            results: page.results,
            next_cursor: page.next_page,
        }
    }

    /// Append a freshly fetched page, replacing the cursor.
    ///
    /// The cursor is replaced even when the new one is empty - that is
    /// what ends load-more availability. A page with zero results but a
    /// live cursor still advances the cursor, so an empty page can never
    /// wedge the listing into an infinite load-more loop.
    pub fn append_page(&self, page: PostPage) -> Self {
        let mut results = self.results.clone();
        results.extend(page.results);
        Self {
            results,
            next_cursor: page.next_page,
        }
    }

    /// Whether another page can be fetched
    pub fn has_more(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Fetch the next page and append it.
    ///
    /// Without a live cursor this is a no-op: the state comes back
    /// unchanged and the fetcher is never invoked. Fetch errors propagate
    /// untouched and leave no partially-updated state behind.
    pub async fn fetch_next<F>(&self, fetcher: &F) -> Result<Self, SourceError>
    where
        F: PageFetcher + ?Sized,
    {
        let Some(cursor) = self.next_cursor.as_deref().filter(|c| !c.is_empty()) else {
            return Ok(self.clone());
        };

        let page = fetcher.fetch_page(cursor).await?;
        Ok(self.append_page(page))
    }

    /// Keep fetching until the cursor is exhausted.
    ///
    /// Used by the static generator, which needs the whole listing rather
    /// than one increment at a time.
    pub async fn fetch_all<F>(&self, fetcher: &F) -> Result<Self, SourceError>
    where
        F: PageFetcher + ?Sized,
    {
        let mut state = self.clone();
        while state.has_more() {
            state = state.fetch_next(fetcher).await?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            ..Post::default()
        }
    }

    fn page(slugs: &[&str], next: Option<&str>) -> PostPage {
        PostPage {
            next_page: next.map(|s| s.to_string()),
            results: slugs.iter().map(|s| post(s)).collect(),
        }
    }

    fn slugs(state: &PaginationState) -> Vec<&str> {
        state.results.iter().map(|p| p.slug.as_str()).collect()
    }

    /// Hands out queued pages and counts how often it was asked
    struct QueuedFetcher {
        pages: Mutex<Vec<PostPage>>,
        calls: AtomicUsize,
    }

    impl QueuedFetcher {
        fn new(pages: Vec<PostPage>) -> Self {
            Self {
                pages: Mutex::new(pages),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for QueuedFetcher {
        async fn fetch_page(&self, _cursor: &str) -> Result<PostPage, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(SourceError::NotFound("exhausted".to_string()));
            }
            Ok(pages.remove(0))
        }
    }

    #[test]
    fn test_initialize_keeps_order_and_cursor() {
        let state = PaginationState::initialize(page(&["a", "b"], Some("cursor-1")));
        assert_eq!(slugs(&state), vec!["a", "b"]);
        assert_eq!(state.next_cursor.as_deref(), Some("cursor-1"));
        assert!(state.has_more());
    }

    #[test]
    fn test_append_is_concatenation_without_dedup() {
        let state = PaginationState::initialize(page(&["a", "b"], Some("cursor-1")));
        let state = state.append_page(page(&["b", "c"], Some("cursor-2")));
        assert_eq!(slugs(&state), vec!["a", "b", "b", "c"]);
        assert_eq!(state.next_cursor.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn test_empty_cursor_terminates_load_more() {
        let state = PaginationState::initialize(page(&["a"], Some("cursor-1")));
        assert!(state.has_more());

        let state = state.append_page(page(&["b"], Some("")));
        assert!(!state.has_more());

        let state = state.append_page(page(&["c"], None));
        assert!(!state.has_more());
    }

    #[test]
    fn test_empty_page_with_live_cursor_still_advances() {
        let state = PaginationState::initialize(page(&["a"], Some("cursor-1")));
        let state = state.append_page(page(&[], Some("cursor-2")));
        assert_eq!(slugs(&state), vec!["a"]);
        assert_eq!(state.next_cursor.as_deref(), Some("cursor-2"));
        assert!(state.has_more());
    }

    #[test]
    fn test_has_more_is_idempotent() {
        let state = PaginationState::initialize(page(&["a"], Some("cursor-1")));
        assert_eq!(state.has_more(), state.has_more());
        let done = state.append_page(page(&[], None));
        assert_eq!(done.has_more(), done.has_more());
    }

    #[tokio::test]
    async fn test_fetch_next_appends_and_replaces_cursor() {
        let fetcher = QueuedFetcher::new(vec![page(&["c"], Some(""))]);

        let state = PaginationState::initialize(page(&["a", "b"], Some("cursor-1")));
        let state = state.fetch_next(&fetcher).await.unwrap();

        assert_eq!(slugs(&state), vec!["a", "b", "c"]);
        assert_eq!(state.next_cursor.as_deref(), Some(""));
        assert!(!state.has_more());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_next_without_cursor_never_calls_fetcher() {
        let fetcher = QueuedFetcher::new(vec![page(&["never"], None)]);

        let state = PaginationState::initialize(page(&["a"], None));
        let next = state.fetch_next(&fetcher).await.unwrap();

        assert_eq!(slugs(&next), slugs(&state));
        assert_eq!(next.next_cursor, state.next_cursor);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_next_propagates_errors() {
        let fetcher = QueuedFetcher::new(vec![]);

        let state = PaginationState::initialize(page(&["a"], Some("cursor-1")));
        let err = state.fetch_next(&fetcher).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));

        // The original state is still intact for the caller
        assert_eq!(slugs(&state), vec!["a"]);
        assert!(state.has_more());
    }

    #[tokio::test]
    async fn test_fetch_all_drains_cursor() {
        let fetcher = QueuedFetcher::new(vec![
            page(&["c", "d"], Some("cursor-2")),
            page(&["e"], None),
        ]);

        let state = PaginationState::initialize(page(&["a", "b"], Some("cursor-1")));
        let state = state.fetch_all(&fetcher).await.unwrap();

        assert_eq!(slugs(&state), vec!["a", "b", "c", "d", "e"]);
        assert!(!state.has_more());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
