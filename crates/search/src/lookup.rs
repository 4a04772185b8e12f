use engage_protocol::Post;
use engage_remote::RemoteStore;

/// Post-page load path: the first listing match for `slug`. Read failures
/// are logged and absorbed; the caller renders its not-found state.
pub async fn post_by_slug(store: &dyn RemoteStore, slug: &str) -> Option<Post> {
    match store.post_by_slug(slug).await {
        Ok(post) => post,
        Err(err) => {
            log::warn!("failed to load post '{slug}': {err}");
            None
        }
    }
}

/// The latest posts for the recent-articles strip; empty on failure.
pub async fn recent_posts(store: &dyn RemoteStore, limit: usize) -> Vec<Post> {
    match store.recent_posts(limit).await {
        Ok(posts) => posts,
        Err(err) => {
            log::warn!("failed to load recent posts: {err}");
            Vec::new()
        }
    }
}
