use std::time::Duration;

/// Errors raised while configuring or constructing the responder.
///
/// Query dispatch itself never fails; see [`crate::Responder::query`].
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("knowledge error: {0}")]
    Knowledge(#[from] knowledge::KnowledgeError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

pub type AssistResult<T> = std::result::Result<T, AssistError>;

/// Failure of the single remote attempt.
///
/// These are recovered inside the responder and only ever surface as a
/// [`crate::Resolution::RemoteFailed`] reply.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode remote response: {0}")]
    Decode(String),

    #[error("remote returned an empty answer")]
    EmptyResponse,

    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),
}
