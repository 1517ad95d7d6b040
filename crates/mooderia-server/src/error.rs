use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing model or contents in request body.")]
    MissingFields,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("No GEMINI_API_KEY configured on the server.")]
    MissingCredential,

    /// Upstream failure. The detail is logged; the client sees a safe
    /// fixed message.
    #[error("AI service error")]
    Upstream(#[source] mooderia_ai::AiError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::MissingFields => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
