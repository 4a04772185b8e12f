use crate::error::{RemoteError, Result};
use crate::store::RemoteStore;
use async_trait::async_trait;
use engage_protocol::{Comment, NewComment, Post, SearchFilter, SortOrder, UserProfile, PAGE_SIZE};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-process stand-in for the HTTP store, used by tests and the demo
/// commands. Filtering, ordering and paging mirror the live server's
/// observable behavior: the term matches title or content
/// case-insensitively, the category filters literally (including
/// `uncategorized`), listings order by `updated_at`, and pages slice
/// `start_index..start_index + PAGE_SIZE`.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    viewer_id: Option<String>,
    offline: AtomicBool,
}

#[derive(Default)]
struct MemoryState {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    users: Vec<UserProfile>,
    next_comment: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            viewer_id: None,
            offline: AtomicBool::new(false),
        }
    }

    /// Act as `user_id` for mutations, the way a session cookie would.
    pub fn with_viewer(mut self, user_id: impl Into<String>) -> Self {
        self.viewer_id = Some(user_id.into());
        self
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.state.get_mut().posts = posts;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.state.get_mut().comments = comments;
        self
    }

    pub fn with_users(mut self, users: Vec<UserProfile>) -> Self {
        self.state.get_mut().users = users;
        self
    }

    /// Make every operation fail with a transport error until reset.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport("store offline".to_string()));
        }
        Ok(())
    }

    fn viewer(&self) -> Result<String> {
        self.viewer_id
            .clone()
            .ok_or_else(|| RemoteError::rejected(401, "Unauthorized"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.check_online()?;
        let state = self.state.lock().await;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.check_online()?;
        let viewer = self.viewer()?;
        if viewer != comment.author_id {
            return Err(RemoteError::rejected(
                403,
                "You are not allowed to create this comment",
            ));
        }
        let mut state = self.state.lock().await;
        state.next_comment += 1;
        let seq = state.next_comment;
        let stored = Comment {
            id: format!("c{seq}"),
            post_id: comment.post_id.clone(),
            content: comment.content.clone(),
            author_id: comment.author_id.clone(),
            created_at: format!("seq-{seq:06}"),
            likes: Vec::new(),
            number_of_likes: 0,
        };
        // newest first, like the live listing
        state.comments.insert(0, stored.clone());
        Ok(stored)
    }

    async fn edit_comment(&self, comment_id: &str, content: &str) -> Result<()> {
        self.check_online()?;
        self.viewer()?;
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| RemoteError::rejected(404, "Comment not found"))?;
        comment.content = content.to_string();
        Ok(())
    }

    async fn toggle_like(&self, comment_id: &str) -> Result<Vec<String>> {
        self.check_online()?;
        let viewer = self.viewer()?;
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| RemoteError::rejected(404, "Comment not found"))?;
        match comment.likes.iter().position(|id| id == &viewer) {
            Some(index) => {
                comment.likes.remove(index);
            }
            None => comment.likes.push(viewer),
        }
        comment.number_of_likes = comment.likes.len();
        Ok(comment.likes.clone())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.check_online()?;
        self.viewer()?;
        let mut state = self.state.lock().await;
        let before = state.comments.len();
        state.comments.retain(|comment| comment.id != comment_id);
        if state.comments.len() == before {
            return Err(RemoteError::rejected(404, "Comment not found"));
        }
        Ok(())
    }

    async fn posts_page(&self, filter: &SearchFilter, start_index: usize) -> Result<Vec<Post>> {
        self.check_online()?;
        let state = self.state.lock().await;
        let term = filter.term.to_lowercase();
        let mut matches: Vec<Post> = state
            .posts
            .iter()
            .filter(|post| {
                term.is_empty()
                    || post.title.to_lowercase().contains(&term)
                    || post.content.to_lowercase().contains(&term)
            })
            .filter(|post| post.category == filter.category)
            .cloned()
            .collect();
        matches.sort_by(|a, b| match filter.sort {
            SortOrder::Ascending => a.updated_at.cmp(&b.updated_at),
            SortOrder::Descending => b.updated_at.cmp(&a.updated_at),
        });
        Ok(matches
            .into_iter()
            .skip(start_index)
            .take(PAGE_SIZE)
            .collect())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.check_online()?;
        let state = self.state.lock().await;
        Ok(state.posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.check_online()?;
        let state = self.state.lock().await;
        let mut posts = state.posts.clone();
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        posts.truncate(limit);
        Ok(posts)
    }

    async fn user_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.check_online()?;
        let state = self.state.lock().await;
        state
            .users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| RemoteError::rejected(404, "User not found"))
    }
}
