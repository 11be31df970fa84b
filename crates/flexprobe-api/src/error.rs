use thiserror::Error;

/// Errors surfaced by the API transport and the orchestrator's status
/// classification. Status/body variants carry the raw transport values for
/// display; nothing interprets error bodies beyond passing them through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("cache reload failed with status {status}: {body}")]
    ReloadFailed { status: u16, body: String },

    #[error("query submission (POST) failed with status {status}: {body}")]
    SubmissionFailed { status: u16, body: String },

    #[error("result retrieval (GET) failed with status {status}: {body}")]
    RetrievalFailed { status: u16, body: String },

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}
