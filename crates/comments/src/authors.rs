use engage_protocol::UserProfile;
use engage_remote::RemoteStore;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

const CACHE_CAPACITY: usize = 128;

/// Resolves comment authors to public profiles, caching lookups so a
/// thread full of comments from the same few users hits the store once
/// per author.
pub struct AuthorDirectory {
    store: Arc<dyn RemoteStore>,
    cache: Mutex<LruCache<String, UserProfile>>,
}

impl AuthorDirectory {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Profile for `user_id`, from cache when possible. `None` when the
    /// lookup fails; the caller renders a placeholder author.
    pub async fn resolve(&self, user_id: &str) -> Option<UserProfile> {
        if let Some(hit) = self.cache.lock().await.get(user_id) {
            return Some(hit.clone());
        }
        match self.store.user_profile(user_id).await {
            Ok(profile) => {
                self.cache
                    .lock()
                    .await
                    .put(user_id.to_string(), profile.clone());
                Some(profile)
            }
            Err(err) => {
                log::warn!("failed to resolve author {user_id}: {err}");
                None
            }
        }
    }
}
