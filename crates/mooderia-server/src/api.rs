use std::sync::Arc;

use axum::{
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use mooderia_ai::{GenerateConfig, GenerateRequest, GenerateResponse, UpstreamClient};

use crate::config::ServerConfig;
use crate::error::ProxyError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Built once at startup; `None` when no server credential is
    /// configured.
    pub upstream: Option<Arc<UpstreamClient>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let upstream = config.api_key.as_ref().map(|key| {
            Arc::new(UpstreamClient::with_base_url(
                config.upstream_base_url.clone(),
                key.clone(),
            ))
        });
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Anything but POST on the generate endpoint is answered with a
        // JSON 405 rather than axum's bare default.
        .route("/api/generate", post(generate).fallback(method_not_allowed))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    instance: String,
}

/// Incoming body with every field optional, so that "missing model or
/// contents" is our 400 rather than a deserialization rejection. Empty
/// strings count as missing, matching the original truthiness check.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    contents: Option<String>,
    #[serde(default)]
    config: Option<GenerateConfig>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        instance: state.config.instance_name.clone(),
    })
}

async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

async fn generate(
    State(state): State<AppState>,
    body: Option<Json<GenerateBody>>,
) -> Result<Json<GenerateResponse>, ProxyError> {
    // An absent or unparsable body is treated as an empty one, so the
    // caller sees the missing-fields 400 instead of a bare rejection.
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let model = body.model.filter(|m| !m.is_empty());
    let contents = body.contents.filter(|c| !c.is_empty());
    let (Some(model), Some(contents)) = (model, contents) else {
        return Err(ProxyError::MissingFields);
    };

    let upstream = state.upstream.as_ref().ok_or(ProxyError::MissingCredential)?;

    let request = GenerateRequest {
        model,
        contents,
        config: body.config,
    };

    let text = upstream.generate_content(&request).await.map_err(|e| {
        error!(error = %e, model = %request.model, "upstream generation failed");
        ProxyError::Upstream(e)
    })?;

    Ok(Json(GenerateResponse { text }))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bind the router on an ephemeral port and return its base URL.
    async fn start_proxy(config: ServerConfig) -> String {
        let app = build_router(AppState::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind proxy");
        let addr = listener.local_addr().expect("proxy addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let base = start_proxy(ServerConfig::default()).await;
        let body: serde_json::Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn missing_contents_is_400_with_exact_body() {
        let base = start_proxy(ServerConfig::default()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .json(&serde_json::json!({ "model": "gemini-3-flash-preview" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing model or contents in request body.");
    }

    #[tokio::test]
    async fn absent_or_malformed_body_is_400_with_json_error() {
        let base = start_proxy(ServerConfig::default()).await;
        let client = reqwest::Client::new();

        // No body at all.
        let response = client
            .post(format!("{base}/api/generate"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing model or contents in request body.");

        // Broken JSON.
        let response = client
            .post(format!("{base}/api/generate"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing model or contents in request body.");
    }

    #[tokio::test]
    async fn empty_model_counts_as_missing() {
        let base = start_proxy(ServerConfig::default()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .json(&serde_json::json!({ "model": "", "contents": "hi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn wrong_verb_is_405_with_json_body() {
        let base = start_proxy(ServerConfig::default()).await;
        let response = reqwest::get(format!("{base}/api/generate")).await.unwrap();
        assert_eq!(response.status().as_u16(), 405);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn missing_server_credential_is_500() {
        let base = start_proxy(ServerConfig::default()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .json(&serde_json::json!({
                "model": "gemini-3-flash-preview",
                "contents": "hello"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "No GEMINI_API_KEY configured on the server.");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_safe_500() {
        let config = ServerConfig {
            api_key: Some("test-key".to_string()),
            // Nothing listens here; the upstream call fails fast.
            upstream_base_url: "http://127.0.0.1:1".to_string(),
            ..ServerConfig::default()
        };
        let base = start_proxy(config).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .json(&serde_json::json!({
                "model": "gemini-3-flash-preview",
                "contents": "hello"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "AI service error");
    }
}
