use reqwest::StatusCode;
use thiserror::Error;

/// Classification of every way a backend call can go wrong. Domain
/// operations never swallow these; callers map them to user-visible
/// messages. None of them is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received at all. Retryable only by explicit user
    /// action (pull-to-refresh and the like).
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The server answered outside 2xx. The body is surfaced so the current
    /// screen can show it.
    #[error("server error ({status}): {body}")]
    Server { status: StatusCode, body: String },

    /// A 2xx body did not match the expected shape. Treated as a defect and
    /// surfaced generically.
    #[error("unexpected response shape: {0}")]
    Decoding(String),

    /// The server reported the session invalid. The request pipeline has
    /// already forced a global sign-out by the time this reaches a caller;
    /// it is surfaced so the current screen can still show a message.
    #[error("session is no longer valid")]
    Unauthenticated,
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}
