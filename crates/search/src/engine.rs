use engage_protocol::{reconcile, Post, SearchFilter};
use engage_remote::RemoteStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Snapshot of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultWindow {
    /// The filter the window belongs to.
    pub filter: SearchFilter,
    /// Results materialized so far, append-only for one filter.
    pub posts: Vec<Post>,
    /// True when the last fetched page was full. A final page of exactly
    /// nine items is indistinguishable from "more exists", so this can be
    /// a false positive; the follow-up fetch then comes back empty.
    pub has_more: bool,
    /// A page fetch is in flight.
    pub loading: bool,
}

/// Translates a filter into pages of results and grows an append-only
/// window over them.
///
/// Each applied filter gets a generation stamp. Page fetches carry the
/// stamp of the filter they were issued for and re-check it after the
/// response arrives; a completion whose filter has been replaced discards
/// itself instead of corrupting the newer window.
pub struct SearchEngine {
    store: Arc<dyn RemoteStore>,
    state: Mutex<EngineState>,
}

#[derive(Default)]
struct EngineState {
    filter: SearchFilter,
    posts: Vec<Post>,
    has_more: bool,
    loading: bool,
    generation: u64,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            state: Mutex::new(EngineState::default()),
        }
    }

    pub async fn window(&self) -> ResultWindow {
        let state = self.state.lock().await;
        ResultWindow {
            filter: state.filter.clone(),
            posts: state.posts.clone(),
            has_more: state.has_more,
            loading: state.loading,
        }
    }

    /// Shareable query-string form of the current filter.
    pub async fn query_string(&self) -> String {
        self.state.lock().await.filter.encode()
    }

    /// Make `filter` current: normalize it, discard the previous window
    /// and fetch its first page. In-flight fetches for the replaced filter
    /// are invalidated by the generation bump.
    pub async fn apply_filter(&self, filter: SearchFilter) {
        let filter = filter.normalized();
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.filter = filter.clone();
            state.posts.clear();
            state.has_more = false;
            state.loading = true;
            state.generation
        };
        self.fetch_page(filter, 0, generation).await;
    }

    /// Decode a previously shared query string and apply it. Re-applying
    /// `query_string()` reproduces the identical filter and first page.
    pub async fn apply_query(&self, query: &str) {
        self.apply_filter(SearchFilter::decode(query)).await;
    }

    /// Fetch the next page and append it. No-op while a fetch is in
    /// flight (rapid repeated triggers must not append a page twice) or
    /// when the last page signalled the end of the listing.
    pub async fn load_more(&self) {
        let (filter, start_index, generation) = {
            let mut state = self.state.lock().await;
            if !state.has_more || state.loading {
                return;
            }
            state.loading = true;
            (state.filter.clone(), state.posts.len(), state.generation)
        };
        self.fetch_page(filter, start_index, generation).await;
    }

    async fn fetch_page(&self, filter: SearchFilter, start_index: usize, generation: u64) {
        let fetched = self.store.posts_page(&filter, start_index).await;
        let mut state = self.state.lock().await;
        if state.generation != generation {
            // a newer filter owns the window; this response is stale
            log::debug!("discarding stale page for '{}'", filter.encode());
            return;
        }
        match fetched {
            Ok(page) => {
                let has_more = reconcile::extend_window(&mut state.posts, page);
                state.has_more = has_more;
            }
            Err(err) => {
                // absorbed: the window stays as-is, only the spinner ends
                log::warn!("page fetch failed for '{}': {err}", filter.encode());
            }
        }
        state.loading = false;
    }
}
