use thiserror::Error;

/// Errors produced by the generation layer.
#[derive(Error, Debug)]
pub enum AiError {
    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream or the proxy answered with a non-success status.
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// No credential available on any transport path.
    #[error("No API key configured")]
    MissingCredential,

    /// The model answered, but with no text at all.
    #[error("No response text received from the model")]
    EmptyResponse,

    /// The upstream answer did not have the expected shape.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}
