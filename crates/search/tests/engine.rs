use async_trait::async_trait;
use engage_protocol::{Comment, NewComment, Post, SearchFilter, SortOrder, UserProfile};
use engage_remote::{MemoryStore, RemoteStore, Result as RemoteResult};
use engage_search::{post_by_slug, recent_posts, SearchEngine};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

fn post(n: usize, title: &str, category: &str) -> Post {
    Post {
        id: format!("p{n}"),
        title: format!("{title} {n}"),
        slug: format!("{}-{n}", title.to_lowercase().replace(' ', "-")),
        content: String::new(),
        category: category.to_string(),
        image: String::new(),
        created_at: format!("t{n:04}"),
        updated_at: format!("t{n:04}"),
    }
}

fn tank_posts(count: usize) -> Vec<Post> {
    (0..count).map(|n| post(n, "Tank log", "military-aid")).collect()
}

fn tank_filter() -> SearchFilter {
    SearchFilter::new("tank", SortOrder::Ascending, "military-aid")
}

/// Wraps the in-memory store so tests can park one page fetch mid-flight
/// and count how many reach the store.
struct GatedStore {
    inner: MemoryStore,
    hold_next_page: AtomicBool,
    parked: Notify,
    release: Notify,
    pages: AtomicUsize,
}

impl GatedStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            hold_next_page: AtomicBool::new(false),
            parked: Notify::new(),
            release: Notify::new(),
            pages: AtomicUsize::new(0),
        }
    }

    fn park_next_page(&self) {
        self.hold_next_page.store(true, Ordering::SeqCst);
    }

    fn pages_fetched(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for GatedStore {
    async fn comments_for_post(&self, post_id: &str) -> RemoteResult<Vec<Comment>> {
        self.inner.comments_for_post(post_id).await
    }
    async fn create_comment(&self, comment: &NewComment) -> RemoteResult<Comment> {
        self.inner.create_comment(comment).await
    }
    async fn edit_comment(&self, comment_id: &str, content: &str) -> RemoteResult<()> {
        self.inner.edit_comment(comment_id, content).await
    }
    async fn toggle_like(&self, comment_id: &str) -> RemoteResult<Vec<String>> {
        self.inner.toggle_like(comment_id).await
    }
    async fn delete_comment(&self, comment_id: &str) -> RemoteResult<()> {
        self.inner.delete_comment(comment_id).await
    }

    async fn posts_page(&self, filter: &SearchFilter, start_index: usize) -> RemoteResult<Vec<Post>> {
        self.pages.fetch_add(1, Ordering::SeqCst);
        if self.hold_next_page.swap(false, Ordering::SeqCst) {
            self.parked.notify_one();
            self.release.notified().await;
        }
        self.inner.posts_page(filter, start_index).await
    }

    async fn post_by_slug(&self, slug: &str) -> RemoteResult<Option<Post>> {
        self.inner.post_by_slug(slug).await
    }
    async fn recent_posts(&self, limit: usize) -> RemoteResult<Vec<Post>> {
        self.inner.recent_posts(limit).await
    }
    async fn user_profile(&self, user_id: &str) -> RemoteResult<UserProfile> {
        self.inner.user_profile(user_id).await
    }
}

#[tokio::test]
async fn pages_of_nine_nine_four_grow_a_window_of_twenty_two() {
    let store = Arc::new(MemoryStore::new().with_posts(tank_posts(22)));
    let engine = SearchEngine::new(store);

    engine.apply_filter(tank_filter()).await;
    let window = engine.window().await;
    assert_eq!(window.posts.len(), 9);
    assert!(window.has_more);
    assert!(!window.loading);

    engine.load_more().await;
    assert_eq!(engine.window().await.posts.len(), 18);
    assert!(engine.window().await.has_more);

    engine.load_more().await;
    let window = engine.window().await;
    assert_eq!(window.posts.len(), 22);
    assert!(!window.has_more);
    // append-only: pages arrived in order with no duplicates
    let ids: Vec<&str> = window.posts.iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<String> = (0..22).map(|n| format!("p{n}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn short_first_page_ends_the_listing() {
    let store = Arc::new(MemoryStore::new().with_posts(tank_posts(4)));
    let engine = SearchEngine::new(store.clone());

    engine.apply_filter(tank_filter()).await;
    let window = engine.window().await;
    assert_eq!(window.posts.len(), 4);
    assert!(!window.has_more);

    // load_more with nothing more to fetch never issues a request
    let gated = Arc::new(GatedStore::new(MemoryStore::new().with_posts(tank_posts(4))));
    let engine = SearchEngine::new(gated.clone());
    engine.apply_filter(tank_filter()).await;
    assert_eq!(gated.pages_fetched(), 1);
    engine.load_more().await;
    assert_eq!(gated.pages_fetched(), 1);
}

#[tokio::test]
async fn a_new_filter_starts_a_new_window() {
    let mut posts = tank_posts(12);
    posts.extend((100..103).map(|n| post(n, "Naval log", "military-aid")));
    let store = Arc::new(MemoryStore::new().with_posts(posts));
    let engine = SearchEngine::new(store);

    engine.apply_filter(tank_filter()).await;
    assert_eq!(engine.window().await.posts.len(), 9);

    engine
        .apply_filter(SearchFilter::new("naval", SortOrder::Ascending, "military-aid"))
        .await;
    let window = engine.window().await;
    assert_eq!(window.posts.len(), 3);
    assert!(window.posts.iter().all(|p| p.title.starts_with("Naval")));
    assert!(!window.has_more);
}

#[tokio::test]
async fn late_response_from_a_replaced_filter_is_discarded() {
    let mut posts = tank_posts(5);
    posts.extend((100..103).map(|n| post(n, "Naval log", "military-aid")));
    let store = Arc::new(GatedStore::new(MemoryStore::new().with_posts(posts)));
    let engine = Arc::new(SearchEngine::new(store.clone()));

    // filter A's first page parks inside the store
    store.park_next_page();
    let stale = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.apply_filter(tank_filter()).await })
    };
    store.parked.notified().await;

    // filter B is applied and completes while A is still parked
    engine
        .apply_filter(SearchFilter::new("naval", SortOrder::Ascending, "military-aid"))
        .await;
    assert_eq!(engine.window().await.posts.len(), 3);

    // A's response lands late and must not corrupt B's window
    store.release.notify_one();
    stale.await.unwrap();

    let window = engine.window().await;
    assert_eq!(window.posts.len(), 3);
    assert!(window.posts.iter().all(|p| p.title.starts_with("Naval")));
    assert_eq!(window.filter.term, "naval");
    assert!(!window.loading);
}

#[tokio::test]
async fn load_more_is_not_reentrant_while_a_fetch_is_in_flight() {
    let store = Arc::new(GatedStore::new(MemoryStore::new().with_posts(tank_posts(22))));
    let engine = Arc::new(SearchEngine::new(store.clone()));

    engine.apply_filter(tank_filter()).await;
    assert_eq!(store.pages_fetched(), 1);

    store.park_next_page();
    let in_flight = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.load_more().await })
    };
    store.parked.notified().await;

    // a second trigger while the first page fetch is outstanding is a no-op
    engine.load_more().await;
    assert_eq!(store.pages_fetched(), 2);

    store.release.notify_one();
    in_flight.await.unwrap();

    let window = engine.window().await;
    assert_eq!(window.posts.len(), 18);
    assert_eq!(store.pages_fetched(), 2);
}

#[tokio::test]
async fn a_shared_query_string_reproduces_filter_and_first_page() {
    let store = Arc::new(MemoryStore::new().with_posts(tank_posts(15)));
    let engine = SearchEngine::new(store.clone());
    engine.apply_filter(tank_filter()).await;
    let shared = engine.query_string().await;
    let original = engine.window().await;

    let restored = SearchEngine::new(store);
    restored.apply_query(&shared).await;
    let window = restored.window().await;
    assert_eq!(window.filter, original.filter);
    assert_eq!(window.posts, original.posts);
    assert_eq!(window.has_more, original.has_more);
}

#[tokio::test]
async fn failed_page_fetch_is_absorbed() {
    let store = Arc::new(MemoryStore::new().with_posts(tank_posts(12)));
    let engine = SearchEngine::new(store.clone());

    engine.apply_filter(tank_filter()).await;
    assert_eq!(engine.window().await.posts.len(), 9);

    store.set_offline(true);
    engine.load_more().await;
    let window = engine.window().await;
    // window untouched, spinner ended, continuation still offered
    assert_eq!(window.posts.len(), 9);
    assert!(!window.loading);
    assert!(window.has_more);

    store.set_offline(false);
    engine.load_more().await;
    assert_eq!(engine.window().await.posts.len(), 12);
}

#[tokio::test]
async fn blank_filter_fields_normalize_to_defaults() {
    let store = Arc::new(MemoryStore::new().with_posts(vec![post(0, "Loose note", "uncategorized")]));
    let engine = SearchEngine::new(store);

    engine
        .apply_filter(SearchFilter::new("", SortOrder::Descending, ""))
        .await;
    let window = engine.window().await;
    assert_eq!(window.filter.category, "uncategorized");
    assert_eq!(window.posts.len(), 1);
}

#[tokio::test]
async fn slug_lookup_returns_first_match_or_none() {
    let store = MemoryStore::new().with_posts(tank_posts(3));
    assert_eq!(
        post_by_slug(&store, "tank-log-1").await.map(|p| p.id),
        Some("p1".to_string())
    );
    assert_eq!(post_by_slug(&store, "missing").await, None);

    store.set_offline(true);
    assert_eq!(post_by_slug(&store, "tank-log-1").await, None);
}

#[tokio::test]
async fn recent_posts_are_newest_first_and_empty_on_failure() {
    let store = MemoryStore::new().with_posts(tank_posts(5));
    let recent = recent_posts(&store, 3).await;
    assert_eq!(
        recent.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        ["p4", "p3", "p2"]
    );

    store.set_offline(true);
    assert!(recent_posts(&store, 3).await.is_empty());
}
