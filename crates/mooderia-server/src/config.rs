//! Server configuration loaded from environment variables.
//!
//! All settings except the upstream credential have defaults, so the
//! proxy can start with zero configuration for local development (it
//! will answer 500 on generation requests until a key is provided).

use std::net::SocketAddr;

use mooderia_shared::constants::DEFAULT_HTTP_PORT;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Upstream generation API key.
    /// Env: `GEMINI_API_KEY` (or legacy `API_KEY`)
    /// Default: none (generation requests answer 500).
    pub api_key: Option<String>,

    /// Base URL of the upstream generation API. Overridable for tests
    /// and self-hosted gateways.
    /// Env: `UPSTREAM_BASE_URL`
    pub upstream_base_url: String,

    /// Human-readable name for this server instance.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Mooderia Proxy"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            api_key: None,
            upstream_base_url: mooderia_ai::upstream::DEFAULT_BASE_URL.to_string(),
            instance_name: "Mooderia Proxy".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        if let Ok(url) = std::env::var("UPSTREAM_BASE_URL") {
            config.upstream_base_url = url;
        }

        if let Ok(name) = std::env::var("INSTANCE_NAME") {
            config.instance_name = name;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
