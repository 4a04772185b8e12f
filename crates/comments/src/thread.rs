use crate::error::{CommentError, Result};
use crate::gate::ConfirmationGate;
use engage_protocol::{reconcile, Comment, NewComment, Session, MAX_COMMENT_CHARS};
use engage_remote::RemoteStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Callback used to send a signed-out viewer to the sign-in page. The
/// synchronizer triggers the navigation; it does not own routing.
pub type SignInPrompt = Box<dyn Fn() + Send + Sync>;

/// Editing mode for one comment, seeded with its current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub comment_id: String,
    pub content: String,
}

/// One post's comment list, maintained as a local cache of the remote
/// collection. Every mutation waits for the store and reconciles with its
/// response; what lands in the list is the store's answer, never a locally
/// computed delta.
///
/// State is guarded, not the operations: the lock is released across every
/// network await, so interleaved completions each reconcile against
/// whatever is current when they land ("last completed wins").
pub struct CommentThread {
    post_id: String,
    session: Session,
    store: Arc<dyn RemoteStore>,
    sign_in: SignInPrompt,
    state: Mutex<ThreadState>,
}

#[derive(Default)]
struct ThreadState {
    comments: Vec<Comment>,
    editing: Option<EditDraft>,
    delete_gate: ConfirmationGate<String>,
}

impl CommentThread {
    pub fn new(post_id: impl Into<String>, session: Session, store: Arc<dyn RemoteStore>) -> Self {
        Self {
            post_id: post_id.into(),
            session,
            store,
            sign_in: Box::new(|| {}),
            state: Mutex::new(ThreadState::default()),
        }
    }

    /// Install the navigation hook invoked when a signed-out viewer
    /// attempts a like or a confirmed delete.
    pub fn on_sign_in_required(mut self, prompt: impl Fn() + Send + Sync + 'static) -> Self {
        self.sign_in = Box::new(prompt);
        self
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.state.lock().await.comments.clone()
    }

    pub async fn comment_count(&self) -> usize {
        self.state.lock().await.comments.len()
    }

    pub async fn editing(&self) -> Option<EditDraft> {
        self.state.lock().await.editing.clone()
    }

    /// Target staged for deletion, when the confirmation modal is up.
    pub async fn pending_delete(&self) -> Option<String> {
        self.state.lock().await.delete_gate.pending().cloned()
    }

    /// Whether edit/delete affordances should be shown for `comment`.
    /// Display convenience only; the store re-checks every mutation.
    pub fn can_modify(&self, comment: &Comment) -> bool {
        self.session.can_modify(&comment.author_id)
    }

    /// Replace local state with the full server-side list. A failed read
    /// leaves the list empty and is only logged; the page stays usable.
    pub async fn load(&self) {
        match self.store.comments_for_post(&self.post_id).await {
            Ok(comments) => self.state.lock().await.comments = comments,
            Err(err) => {
                log::warn!("failed to load comments for {}: {err}", self.post_id);
                self.state.lock().await.comments.clear();
            }
        }
    }

    /// Validate and persist a new comment. The server echo is prepended on
    /// success; on failure nothing changes locally and the error is
    /// returned for the composer to display.
    pub async fn submit(&self, draft: &str) -> Result<Comment> {
        let author_id = match self.session.viewer_id() {
            Some(id) => id.to_string(),
            None => return Err(CommentError::SignedOut),
        };
        validate_content(draft)?;

        let created = self
            .store
            .create_comment(&NewComment {
                content: draft.to_string(),
                post_id: self.post_id.clone(),
                author_id,
            })
            .await?;
        let mut state = self.state.lock().await;
        reconcile::prepend_created(&mut state.comments, created.clone());
        Ok(created)
    }

    /// Toggle the viewer's like. Signed-out viewers are sent to sign-in
    /// and no request is issued. The response's like set replaces the
    /// local one wholesale, so concurrent toggles from other sessions
    /// cannot drift the count. Failures are logged and swallowed.
    pub async fn toggle_like(&self, comment_id: &str) {
        if !self.session.is_signed_in() {
            (self.sign_in)();
            return;
        }
        match self.store.toggle_like(comment_id).await {
            Ok(likes) => {
                let mut state = self.state.lock().await;
                if !reconcile::apply_like_update(&mut state.comments, comment_id, likes) {
                    log::debug!("like update for comment {comment_id} no longer in the list");
                }
            }
            Err(err) => log::warn!("failed to toggle like on {comment_id}: {err}"),
        }
    }

    /// Enter editing mode for `comment_id`, seeding the draft from its
    /// current content. No network call. Returns false for unknown ids.
    pub async fn begin_edit(&self, comment_id: &str) -> bool {
        let mut state = self.state.lock().await;
        let content = match state
            .comments
            .iter()
            .find(|comment| comment.id == comment_id)
        {
            Some(comment) => comment.content.clone(),
            None => return false,
        };
        state.editing = Some(EditDraft {
            comment_id: comment_id.to_string(),
            content,
        });
        true
    }

    pub async fn cancel_edit(&self) {
        self.state.lock().await.editing = None;
    }

    /// Persist an edited draft. On success the draft text (not a re-fetch)
    /// replaces the content locally and editing mode ends; on failure the
    /// editor stays open with state untouched.
    pub async fn save_edit(&self, comment_id: &str, draft: &str) -> Result<()> {
        validate_content(draft)?;
        self.store.edit_comment(comment_id, draft).await?;
        let mut state = self.state.lock().await;
        reconcile::apply_edit(&mut state.comments, comment_id, draft);
        state.editing = None;
        Ok(())
    }

    /// Stage a delete. Nothing is removed until the gate confirms; a new
    /// request replaces any previously staged target.
    pub async fn request_delete(&self, comment_id: &str) {
        self.state
            .lock()
            .await
            .delete_gate
            .request(comment_id.to_string());
    }

    pub async fn cancel_delete(&self) {
        self.state.lock().await.delete_gate.cancel();
    }

    /// Complete a staged delete. The gate is consumed first (the modal
    /// closes either way); signed-out viewers are redirected instead of
    /// deleting. The comment is removed locally only after the store
    /// confirms — a failed delete must not vanish a comment that would
    /// reappear on refresh.
    pub async fn confirm_delete(&self) {
        let target = self.state.lock().await.delete_gate.confirm();
        let comment_id = match target {
            Some(id) => id,
            None => return,
        };
        if !self.session.is_signed_in() {
            (self.sign_in)();
            return;
        }
        match self.store.delete_comment(&comment_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                reconcile::remove_by_id(&mut state.comments, &comment_id);
            }
            Err(err) => log::warn!("failed to delete comment {comment_id}: {err}"),
        }
    }
}

fn validate_content(draft: &str) -> Result<()> {
    let chars = draft.chars().count();
    if chars == 0 {
        return Err(CommentError::Empty);
    }
    if chars > MAX_COMMENT_CHARS {
        return Err(CommentError::TooLong {
            max: MAX_COMMENT_CHARS,
        });
    }
    Ok(())
}
