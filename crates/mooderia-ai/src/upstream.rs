//! Direct client for the hosted generation API.
//!
//! Used in two places: the proxy server (with the server-held key) and
//! the client-side fallback path (when a local key is configured).

use serde_json::json;
use tracing::debug;

use crate::error::AiError;
use crate::types::GenerateRequest;

/// Default REST endpoint of the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Direct upstream API client.
pub struct UpstreamClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Point the client at a non-default base URL (tests, self-hosted
    /// gateways).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Run one generation request and extract the response text.
    ///
    /// Single attempt; no timeout or retry policy beyond reqwest's
    /// defaults.
    pub async fn generate_content(&self, req: &GenerateRequest) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, req.model, self.api_key
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": req.contents }] }],
        });

        if let Some(config) = &req.config {
            if let Some(instruction) = &config.system_instruction {
                body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
            }
            let mut generation_config = serde_json::Map::new();
            if let Some(mime) = &config.response_mime_type {
                generation_config.insert("responseMimeType".to_string(), json!(mime));
            }
            if let Some(schema) = &config.response_schema {
                generation_config.insert("responseSchema".to_string(), schema.clone());
            }
            if !generation_config.is_empty() {
                body["generationConfig"] = serde_json::Value::Object(generation_config);
            }
        }

        debug!(model = %req.model, "sending upstream generation request");

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream { status, body });
        }

        let response_json: serde_json::Value = response.json().await?;

        let text = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                AiError::MalformedResponse("no candidates[0].content.parts[0].text".to_string())
            })?
            .to_string();

        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = UpstreamClient::with_base_url("http://localhost:9999/", "k");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[tokio::test]
    #[ignore] // Requires a real GEMINI_API_KEY
    async fn live_generate_content() {
        let key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
        let client = UpstreamClient::new(key);
        let req = GenerateRequest::new("gemini-3-flash-preview", "Say hello in one word.");
        let text = client.generate_content(&req).await.unwrap();
        assert!(!text.is_empty());
    }
}
