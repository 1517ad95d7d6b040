//! # mooderia-store
//!
//! Local storage for the Mooderia application, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed helpers for the message
//! log and the user directory, plus a JSON snapshot format compatible
//! with the legacy string-keyed browser storage. [`SessionStore`] binds
//! a database to one signed-in user and implements the conversation
//! core's store port.

pub mod database;
pub mod messages;
pub mod migrations;
pub mod session_store;
pub mod snapshot;
pub mod users;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use session_store::SessionStore;
pub use snapshot::{ImportStats, SnapshotPayload};
