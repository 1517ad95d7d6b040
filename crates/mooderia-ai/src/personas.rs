//! Persona helpers.
//!
//! Each persona is a fixed system-prompt template bound to one
//! conversational character. The reasoning-heavy personas run on the
//! pro model, the flavor personas on flash.

use serde_json::json;

use mooderia_shared::constants::{MODEL_FLASH, MODEL_PRO};
use mooderia_shared::ZodiacSign;

use crate::client::AiClient;
use crate::error::AiError;
use crate::types::{GenerateRequest, LovePrediction};

/// The free-text conversational personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Psychiatrist,
    Nutritionist,
    StudyGuide,
    FortuneTeller,
}

impl Persona {
    pub fn model(&self) -> &'static str {
        match self {
            Persona::Psychiatrist | Persona::Nutritionist | Persona::StudyGuide => MODEL_PRO,
            Persona::FortuneTeller => MODEL_FLASH,
        }
    }

    pub fn system_instruction(&self) -> &'static str {
        match self {
            Persona::Psychiatrist => {
                "You are Dr. Philippe Pinel, a compassionate and expert psychiatrist in the city \
                 of Mooderia. You provide helpful advice for mental well-being while maintaining \
                 a professional yet friendly tone. You were formerly known as Dr. Mood."
            }
            Persona::Nutritionist => {
                "You are Dr. Antoine Lavoisier, a professional nutritionist in Mooderia. You \
                 guide users on meal plans and wellness. You were formerly known as Dr. Health."
            }
            Persona::StudyGuide => {
                "You are Sir Clark (formerly known as Sir Ron Clark), an inspiring and energetic \
                 educator in Mooderia. You help students with study methods, provide words of \
                 wisdom, and assist with assignments by explaining concepts clearly and \
                 motivating them to achieve excellence."
            }
            Persona::FortuneTeller => {
                "You are a mystical fortune teller. Your answers are short, poetic, and slightly \
                 mysterious."
            }
        }
    }

    /// Build the request for one user message addressed to this persona.
    pub fn request(&self, message: &str) -> GenerateRequest {
        let contents = match self {
            // The fortune teller answers a question, not a chat turn.
            Persona::FortuneTeller => {
                format!("Predict the answer to this question in a mystical way: {message}")
            }
            _ => message.to_string(),
        };
        GenerateRequest::new(self.model(), contents)
            .with_system_instruction(self.system_instruction())
    }
}

/// Ask a persona for a reply to one message.
pub async fn persona_response(
    client: &AiClient,
    persona: Persona,
    message: &str,
) -> Result<String, AiError> {
    client.generate(&persona.request(message)).await
}

/// Daily horoscope for one sign: three encouraging sentences.
pub async fn daily_horoscope(client: &AiClient, sign: ZodiacSign) -> Result<String, AiError> {
    let req = GenerateRequest::new(
        MODEL_FLASH,
        format!("Provide a daily horoscope for {sign} today."),
    )
    .with_system_instruction(
        "You are an expert astrologer. Provide a 3-sentence horoscope that is encouraging and \
         insightful.",
    );
    client.generate(&req).await
}

/// Longer-form plain-text reading of the current planetary transits.
pub async fn planetary_insights(client: &AiClient, sign: ZodiacSign) -> Result<String, AiError> {
    let req = GenerateRequest::new(
        MODEL_FLASH,
        format!(
            "Explain how current planetary movements affect the mood of a {sign} today. Include \
             one specific planet in transit."
        ),
    )
    .with_system_instruction(
        "You are a cosmic astrologer providing deep, personalized insights based on planetary \
         aspects. CRITICAL: Do not use any Markdown symbols like asterisks (*), hashtags (#), or \
         dashes (-) for formatting. Provide the response as plain, natural text organized into \
         multiple clear paragraphs. Do not return a single long line of text.",
    );
    client.generate(&req).await
}

/// Love compatibility between two signs, as schema-constrained JSON.
///
/// "No text at all" is fatal and propagates; "text that is not valid
/// JSON" is recovered into the zero-percentage fallback.
pub async fn love_prediction(
    client: &AiClient,
    sign1: ZodiacSign,
    sign2: ZodiacSign,
) -> Result<LovePrediction, AiError> {
    let req = GenerateRequest::new(
        MODEL_FLASH,
        format!(
            "Predict love compatibility between {sign1} and {sign2}. Return only a JSON object \
             with 'percentage' (0-100) and 'reason' (detailed multi-sentence explanation)."
        ),
    )
    .with_json_schema(json!({
        "type": "OBJECT",
        "properties": {
            "percentage": { "type": "NUMBER" },
            "reason": { "type": "STRING" }
        },
        "required": ["percentage", "reason"]
    }));

    let text = client.generate(&req).await?;
    Ok(parse_love_prediction(&text))
}

fn parse_love_prediction(text: &str) -> LovePrediction {
    serde_json::from_str(text.trim()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "love prediction was not valid JSON");
        LovePrediction::invalid_json()
    })
}
