//! # mooderia-shared
//!
//! Domain types shared across the Mooderia crates: user and message
//! models, zodiac signs, and the constants every layer agrees on.

pub mod constants;
pub mod types;
pub mod zodiac;

pub use types::{Message, User};
pub use zodiac::ZodiacSign;
