//! Persona commands.
//!
//! This is the boundary where typed generation failures collapse into
//! the fixed placeholder strings a UI shows. The service layer below
//! keeps the distinction so other callers can still tell failure from
//! content.

use tracing::warn;

use mooderia_ai::personas::{daily_horoscope, love_prediction, persona_response, planetary_insights};
use mooderia_ai::{AiClient, AiError, LovePrediction, Persona};
use mooderia_shared::ZodiacSign;

use crate::error::ClientError;

/// Shown when no transport path can produce text.
pub const PLACEHOLDER_UNAVAILABLE: &str = "(AI unavailable — no API key configured)";

/// Shown when the model answered with empty text.
pub const PLACEHOLDER_EMPTY: &str = "(AI returned empty response)";

/// Collapse a generation outcome into displayable text.
fn collapse(result: Result<String, AiError>) -> String {
    match result {
        Ok(text) => text,
        Err(AiError::EmptyResponse) => PLACEHOLDER_EMPTY.to_string(),
        Err(e) => {
            warn!(error = %e, "generation failed, showing placeholder");
            PLACEHOLDER_UNAVAILABLE.to_string()
        }
    }
}

pub async fn ask_psychiatrist(client: &AiClient, message: &str) -> String {
    collapse(persona_response(client, Persona::Psychiatrist, message).await)
}

pub async fn ask_nutritionist(client: &AiClient, message: &str) -> String {
    collapse(persona_response(client, Persona::Nutritionist, message).await)
}

pub async fn ask_study_guide(client: &AiClient, message: &str) -> String {
    collapse(persona_response(client, Persona::StudyGuide, message).await)
}

pub async fn ask_fortune_teller(client: &AiClient, question: &str) -> String {
    collapse(persona_response(client, Persona::FortuneTeller, question).await)
}

pub async fn get_daily_horoscope(client: &AiClient, sign: ZodiacSign) -> String {
    collapse(daily_horoscope(client, sign).await)
}

pub async fn get_planetary_insights(client: &AiClient, sign: ZodiacSign) -> String {
    collapse(planetary_insights(client, sign).await)
}

/// Love compatibility keeps its error: a model that returns no text at
/// all is fatal to this call, while unparsable JSON was already
/// recovered below into the zero-percentage fallback.
pub async fn predict_love(
    client: &AiClient,
    sign1: ZodiacSign,
    sign2: ZodiacSign,
) -> Result<LovePrediction, ClientError> {
    Ok(love_prediction(client, sign1, sign2).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mooderia_ai::AiConfig;

    #[test]
    fn collapse_maps_empty_and_unavailable_differently() {
        assert_eq!(collapse(Err(AiError::EmptyResponse)), PLACEHOLDER_EMPTY);
        assert_eq!(
            collapse(Err(AiError::MissingCredential)),
            PLACEHOLDER_UNAVAILABLE
        );
        assert_eq!(collapse(Ok("stars".to_string())), "stars");
    }

    #[tokio::test]
    async fn unconfigured_client_yields_placeholder_not_error() {
        let client = AiClient::new(AiConfig::default());
        let reply = ask_fortune_teller(&client, "Will it rain?").await;
        assert_eq!(reply, PLACEHOLDER_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unconfigured_love_prediction_propagates_the_error() {
        let client = AiClient::new(AiConfig::default());
        assert!(predict_love(&client, ZodiacSign::Leo, ZodiacSign::Virgo)
            .await
            .is_err());
    }
}
