use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Failure at the remote-store boundary. Network and parse problems are
/// converted here; nothing lower-level crosses into the engines.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never completed (refused connection, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status. `message` is the
    /// server's own wording when its error body carried one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
