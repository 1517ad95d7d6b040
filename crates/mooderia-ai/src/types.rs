//! Wire types for the generation proxy.
//!
//! These match the proxy's JSON contract field for field (camelCase);
//! the same request struct is mapped onto the upstream REST format by
//! [`crate::upstream`].

use serde::{Deserialize, Serialize};

/// A generation request as accepted by `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub model: String,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerateConfig>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
            config: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config
            .get_or_insert_with(GenerateConfig::default)
            .system_instruction = Some(instruction.into());
        self
    }

    /// Constrain the response to JSON matching `schema`.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        let config = self.config.get_or_insert_with(GenerateConfig::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }
}

/// Optional generation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Success body of the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Structured result of the love-compatibility helper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LovePrediction {
    pub percentage: f64,
    pub reason: String,
}

impl LovePrediction {
    /// The recovery value used when the model returns text that is not
    /// valid JSON.
    pub fn invalid_json() -> Self {
        Self {
            percentage: 0.0,
            reason: "AI returned invalid JSON.".to_string(),
        }
    }
}
