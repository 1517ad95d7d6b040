//! # mooderia-chat
//!
//! The conversation core: pure projections over a flat direct-message
//! log (partners, transcripts, unread counts) and the peer-selection
//! state machine that drives the mark-read side effect.
//!
//! The crate never reads ambient storage and never mutates the log it
//! is given. Mutation is requested through the [`ConversationStore`]
//! port, which the storage layer implements. All projections are
//! recomputed from the full log on every call; the expected data
//! volume is a single person's message history, so there is no
//! incremental index to keep in sync.

pub mod projections;
pub mod session;

pub use projections::{conversation_partners, search_directory, transcript, unread_counts};
pub use session::{ChatSession, ConversationStore, Selection};
