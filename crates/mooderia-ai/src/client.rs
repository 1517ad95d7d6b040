//! Proxy-first generation client.
//!
//! The client sends every request to the proxy endpoint so the API key
//! stays on the server. If the proxy is unreachable or answers with an
//! error and a client-side key is configured, it makes one direct
//! upstream attempt. Two attempts total, never more; no retries.

use tracing::{debug, warn};

use mooderia_shared::constants::GENERATE_PATH;

use crate::error::AiError;
use crate::types::{GenerateRequest, GenerateResponse};
use crate::upstream::UpstreamClient;

/// Client-side generation configuration.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    /// Base URL of the proxy (e.g. `https://mooderia.example`). `None`
    /// skips the proxy path entirely.
    pub proxy_base: Option<String>,
    /// Client-side upstream key for the fallback path.
    pub api_key: Option<String>,
}

impl AiConfig {
    /// Read configuration from the environment: `MOODERIA_PROXY_URL`
    /// and `GEMINI_API_KEY` / `API_KEY`.
    pub fn from_env() -> Self {
        Self {
            proxy_base: std::env::var("MOODERIA_PROXY_URL").ok(),
            api_key: std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok(),
        }
    }
}

/// Generation client used by all persona helpers.
pub struct AiClient {
    config: AiConfig,
    client: reqwest::Client,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Run one generation request: proxy first, direct upstream as the
    /// single fallback.
    ///
    /// Failure surfaces as a typed error; the caller decides whether to
    /// show a placeholder string.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<String, AiError> {
        if let Some(base) = &self.config.proxy_base {
            match self.generate_via_proxy(base, req).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(error = %e, "proxy generation failed, trying direct upstream");
                }
            }
        }

        let Some(key) = &self.config.api_key else {
            return Err(AiError::MissingCredential);
        };

        UpstreamClient::new(key.clone()).generate_content(req).await
    }

    async fn generate_via_proxy(
        &self,
        base: &str,
        req: &GenerateRequest,
    ) -> Result<String, AiError> {
        let url = format!("{}{}", base.trim_end_matches('/'), GENERATE_PATH);

        debug!(model = %req.model, url = %url, "sending proxied generation request");

        let response = self.client.post(&url).json(req).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        if parsed.text.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(parsed.text)
    }
}
