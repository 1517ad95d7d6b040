use thiserror::Error;

/// Errors surfaced to the UI host by the command layer.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No citizen signed in")]
    NoCurrentUser,

    #[error("Database not opened")]
    NoDatabase,

    #[error("Store error: {0}")]
    Store(#[from] mooderia_store::StoreError),

    #[error("AI error: {0}")]
    Ai(#[from] mooderia_ai::AiError),
}
