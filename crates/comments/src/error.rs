use engage_remote::RemoteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommentError>;

/// Rejections surfaced to the comment composer. Validation variants are
/// produced before any network call; `Remote` wraps a failed write whose
/// message is shown to the user.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error("comment cannot be empty")]
    Empty,

    #[error("comment cannot exceed {max} characters")]
    TooLong { max: usize },

    #[error("you must be signed in to comment")]
    SignedOut,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
