//! # mooderia-ai
//!
//! Persona-flavored text generation for Mooderia.
//!
//! The crate talks to the generation proxy first (so the credential
//! stays server-side) and falls back to a direct upstream call when a
//! client-side key is configured. Every helper returns a typed result;
//! collapsing failures into user-facing placeholder strings is the
//! application layer's job, not this crate's.

pub mod client;
pub mod error;
pub mod personas;
pub mod types;
pub mod upstream;

pub use client::{AiClient, AiConfig};
pub use error::AiError;
pub use personas::Persona;
pub use types::{GenerateConfig, GenerateRequest, GenerateResponse, LovePrediction};
pub use upstream::UpstreamClient;
