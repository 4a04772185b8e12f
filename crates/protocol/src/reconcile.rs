//! Merge rules applied to local state after a remote operation completes.
//!
//! Every rule replaces local values with what the store returned; none of
//! them computes the new state from a local delta. Centralizing the rules
//! keeps the comment thread and the result window from drifting apart in
//! how they absorb responses.

use crate::comment::Comment;
use crate::query::PAGE_SIZE;

/// A freshly created comment goes to the front of the list (listings are
/// newest first). The argument is the server echo, never the typed draft.
pub fn prepend_created(comments: &mut Vec<Comment>, created: Comment) {
    comments.insert(0, created);
}

/// Replace a comment's like set with the authoritative one. The count is
/// recomputed from the set, which also restores `number_of_likes ==
/// likes.len()` if a payload ever arrived drifted. Returns false when the
/// comment is no longer present locally.
pub fn apply_like_update(comments: &mut [Comment], comment_id: &str, likes: Vec<String>) -> bool {
    match comments.iter_mut().find(|comment| comment.id == comment_id) {
        Some(comment) => {
            comment.number_of_likes = likes.len();
            comment.likes = likes;
            true
        }
        None => false,
    }
}

/// Replace a comment's content with the accepted draft.
pub fn apply_edit(comments: &mut [Comment], comment_id: &str, content: &str) -> bool {
    match comments.iter_mut().find(|comment| comment.id == comment_id) {
        Some(comment) => {
            comment.content = content.to_string();
            true
        }
        None => false,
    }
}

/// Drop a comment by identity after a confirmed remote delete.
pub fn remove_by_id(comments: &mut Vec<Comment>, comment_id: &str) -> bool {
    let before = comments.len();
    comments.retain(|comment| comment.id != comment_id);
    comments.len() != before
}

/// Append one fetched page to a result window and report whether more may
/// remain. A full page signals continuation; a short (or empty) page ends
/// the listing. A final page of exactly [`PAGE_SIZE`] items is
/// indistinguishable from "more exists", so the signal can be a false
/// positive.
pub fn extend_window<T>(window: &mut Vec<T>, page: Vec<T>) -> bool {
    let has_more = page.len() == PAGE_SIZE;
    window.extend(page);
    has_more
}
