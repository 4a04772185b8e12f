use crate::error::Result;
use async_trait::async_trait;
use engage_protocol::{Comment, NewComment, Post, SearchFilter, UserProfile};

/// The authoritative store of posts, comments and users.
///
/// Implementations behave like the HTTP API: reads return current
/// server-side state, mutations return the canonical entity (or like set)
/// actually stored. The engines treat every response as authoritative and
/// never second-guess it locally.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All comments for one post, newest first.
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>>;

    /// Persist a new comment and return the canonical stored entity.
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;

    /// Replace a comment's content.
    async fn edit_comment(&self, comment_id: &str, content: &str) -> Result<()>;

    /// Toggle the calling identity's like on a comment and return the
    /// authoritative like set.
    async fn toggle_like(&self, comment_id: &str) -> Result<Vec<String>>;

    async fn delete_comment(&self, comment_id: &str) -> Result<()>;

    /// One page of posts matching `filter`, starting at `start_index`.
    /// Returns at most [`engage_protocol::PAGE_SIZE`] items.
    async fn posts_page(&self, filter: &SearchFilter, start_index: usize) -> Result<Vec<Post>>;

    /// Look up a single post by its URL slug.
    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// The most recently updated posts, newest first.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>>;

    /// Public profile for a user id.
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile>;
}
