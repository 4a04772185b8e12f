use serde::{Deserialize, Serialize};

/// Upper bound on comment length, checked before submission. The store
/// applies the same limit and stays authoritative after any round trip.
pub const MAX_COMMENT_CHARS: usize = 200;

/// Characters left in the composer for a given draft. Purely presentational.
pub fn remaining_chars(draft: &str) -> usize {
    MAX_COMMENT_CHARS.saturating_sub(draft.chars().count())
}

/// A comment as stored remotely. Ids, timestamps and the like set always
/// come from the store; the client never fabricates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub post_id: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub author_id: String,
    #[serde(default)]
    pub created_at: String,
    /// Ids of the users who currently like this comment.
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub number_of_likes: usize,
}

impl Comment {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }
}

/// Body of a create request. The response, not this draft, is what lands
/// in local state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub post_id: String,
    #[serde(rename = "userId")]
    pub author_id: String,
}
