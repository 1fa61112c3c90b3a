//! Resumable discovery over a fetcher's paginated search.
//!
//! The continuation cursor is written to the store before each page request
//! and removed once the last page is consumed, so an interrupted run picks up
//! where it stopped. Delivery is at-least-once: the page in flight when the
//! process died is requested again.

use std::collections::VecDeque;
use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

use super::{FetchError, Fetcher, SearchCursor};
use crate::model::ProjectRef;
use crate::request::RetryPolicy;
use crate::store::{ProjectStateStore, StoreError};

/// Errors that end a discovery stream.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("discovery failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("discovery state unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Discovery options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoverOptions {
    /// Ignore and discard any stored cursor.
    pub start_over: bool,
}

enum Step {
    Load,
    Request(Option<SearchCursor>),
    Drain {
        buffered: VecDeque<ProjectRef>,
        next: Option<SearchCursor>,
    },
    Finish,
    Done,
}

struct State {
    fetcher: Arc<dyn Fetcher>,
    store: ProjectStateStore,
    retry: RetryPolicy,
    options: DiscoverOptions,
    step: Step,
}

/// Streams every project the fetcher can discover.
///
/// The stream ends after the first error it yields.
pub fn discover(
    fetcher: Arc<dyn Fetcher>,
    store: ProjectStateStore,
    retry: RetryPolicy,
    options: DiscoverOptions,
) -> BoxStream<'static, Result<ProjectRef, DiscoveryError>> {
    let state = State {
        fetcher,
        store,
        retry,
        options,
        step: Step::Load,
    };
    stream::unfold(state, |mut state| async move {
        loop {
            match std::mem::replace(&mut state.step, Step::Done) {
                Step::Load => match load_cursor(&state).await {
                    Ok(cursor) => state.step = Step::Request(cursor),
                    Err(error) => return Some((Err(error), state)),
                },
                Step::Request(cursor) => match request_page(&state, cursor).await {
                    Ok(step) => state.step = step,
                    Err(error) => return Some((Err(error), state)),
                },
                Step::Drain {
                    mut buffered,
                    next,
                } => {
                    if let Some(project) = buffered.pop_front() {
                        state.step = Step::Drain { buffered, next };
                        return Some((Ok(project), state));
                    }
                    state.step = match next {
                        Some(cursor) => Step::Request(Some(cursor)),
                        None => Step::Finish,
                    };
                }
                Step::Finish => {
                    let platform = state.fetcher.platform();
                    if let Err(error) = state.store.clear_cursor(platform).await {
                        return Some((Err(error.into()), state));
                    }
                    info!(platform, "discovery complete");
                }
                Step::Done => return None,
            }
        }
    })
    .boxed()
}

async fn load_cursor(state: &State) -> Result<Option<SearchCursor>, DiscoveryError> {
    let platform = state.fetcher.platform();
    if state.options.start_over {
        state.store.clear_cursor(platform).await?;
        debug!(platform, "starting discovery from the beginning");
        return Ok(None);
    }
    let cursor = state.store.load_cursor(platform).await?;
    if cursor.is_some() {
        info!(platform, "resuming discovery from stored cursor");
    }
    Ok(cursor)
}

async fn request_page(state: &State, cursor: Option<SearchCursor>) -> Result<Step, DiscoveryError> {
    let platform = state.fetcher.platform();
    if let Some(cursor) = &cursor {
        state.store.save_cursor(platform, cursor).await?;
    }

    let fetcher = &state.fetcher;
    let page = state
        .retry
        .execute("search", || fetcher.search_page(cursor.as_ref()))
        .await?;
    debug!(
        platform,
        found = page.refs.len(),
        more = page.next.is_some(),
        "search page received"
    );

    Ok(Step::Drain {
        buffered: page.refs.into(),
        next: page.next,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures_util::TryStreamExt;
    use url::Url;

    use super::*;
    use crate::fetcher::SearchPage;
    use crate::model::{FetchedProject, SourcingProcedure};

    /// Serves three pages of two refs each, failing once when asked to.
    struct PagedFetcher {
        fail_on_page: Mutex<Option<u64>>,
        requested: Mutex<Vec<Option<u64>>>,
    }

    impl PagedFetcher {
        fn new(fail_on_page: Option<u64>) -> Self {
            Self {
                fail_on_page: Mutex::new(fail_on_page),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Fetcher for PagedFetcher {
        fn platform(&self) -> &'static str {
            "test"
        }

        fn sourcing_procedure(&self) -> SourcingProcedure {
            SourcingProcedure::Api
        }

        fn can_handle(&self, _url: &Url) -> bool {
            false
        }

        fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
            Err(FetchError::fatal(url.as_str(), "unsupported"))
        }

        async fn search_page(
            &self,
            cursor: Option<&SearchCursor>,
        ) -> Result<SearchPage, FetchError> {
            let page = cursor.and_then(|c| c.u64_field("page"));
            self.requested.lock().unwrap().push(page);
            let page = page.unwrap_or(0);
            if self.fail_on_page.lock().unwrap().take_if(|p| *p == page).is_some() {
                return Err(FetchError::fatal("test", "boom"));
            }
            let refs = (0..2)
                .map(|i| {
                    let id = format!("p{page}-{i}");
                    ProjectRef::new("test", id.clone(), format!("https://test/{id}"))
                })
                .collect();
            let next = (page < 2).then(|| SearchCursor::new(serde_json::json!({"page": page + 1})));
            Ok(SearchPage { refs, next })
        }

        async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
            Err(FetchError::not_found(project.canonical_url.clone()))
        }
    }

    async fn store() -> ProjectStateStore {
        ProjectStateStore::in_memory().await.unwrap()
    }

    // ==================== Discovery Tests ====================

    #[tokio::test]
    async fn test_discover_walks_all_pages_and_clears_cursor() {
        let store = store().await;
        let fetcher = Arc::new(PagedFetcher::new(None));

        let refs: Vec<ProjectRef> = discover(
            fetcher.clone(),
            store.clone(),
            RetryPolicy::from_retries(0),
            DiscoverOptions::default(),
        )
        .try_collect()
        .await
        .unwrap();

        assert_eq!(refs.len(), 6);
        assert_eq!(refs[0].id, "p0-0");
        assert_eq!(refs[5].id, "p2-1");
        assert!(store.load_cursor("test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_discover_resumes_from_stored_cursor() {
        let store = store().await;
        let failing = Arc::new(PagedFetcher::new(Some(1)));

        let first: Vec<_> = discover(
            failing,
            store.clone(),
            RetryPolicy::from_retries(0),
            DiscoverOptions::default(),
        )
        .collect()
        .await;
        assert_eq!(first.len(), 3);
        assert!(first[2].is_err());

        let cursor = store.load_cursor("test").await.unwrap().unwrap();
        assert_eq!(cursor.u64_field("page"), Some(1));

        let fetcher = Arc::new(PagedFetcher::new(None));
        let resumed: Vec<ProjectRef> = discover(
            fetcher.clone(),
            store.clone(),
            RetryPolicy::from_retries(0),
            DiscoverOptions::default(),
        )
        .try_collect()
        .await
        .unwrap();

        assert_eq!(resumed.len(), 4);
        assert_eq!(resumed[0].id, "p1-0");
        assert_eq!(fetcher.requested.lock().unwrap()[0], Some(1));
    }

    #[tokio::test]
    async fn test_discover_start_over_discards_cursor() {
        let store = store().await;
        store
            .save_cursor("test", &SearchCursor::new(serde_json::json!({"page": 2})))
            .await
            .unwrap();

        let fetcher = Arc::new(PagedFetcher::new(None));
        let refs: Vec<ProjectRef> = discover(
            fetcher.clone(),
            store.clone(),
            RetryPolicy::from_retries(0),
            DiscoverOptions { start_over: true },
        )
        .try_collect()
        .await
        .unwrap();

        assert_eq!(refs.len(), 6);
        assert_eq!(fetcher.requested.lock().unwrap()[0], None);
    }
}
