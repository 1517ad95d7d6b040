//! Application state shared across all commands.
//!
//! A UI host owns one [`AppState`] for the lifetime of the window and
//! hands it to every command call. Execution is single-threaded and
//! event-driven; the state carries no locks of its own.

use tokio::sync::mpsc;

use mooderia_chat::ChatSession;
use mooderia_shared::User;
use mooderia_store::Database;

use crate::error::ClientError;
use crate::events::ClientEvent;

/// Central application state.
pub struct AppState {
    /// The signed-in citizen. `None` until login or registration.
    pub current_user: Option<User>,

    /// Handle to the local database. `None` until opened.
    pub database: Option<Database>,

    /// Peer-selection state machine for the community view.
    pub session: ChatSession,

    /// Sender half of the channel the UI host listens on. `None` when
    /// the host does not subscribe to events.
    pub event_tx: Option<mpsc::UnboundedSender<ClientEvent>>,
}

impl AppState {
    /// Create a new, uninitialised application state.
    pub fn new() -> Self {
        Self {
            current_user: None,
            database: None,
            session: ChatSession::new(),
            event_tx: None,
        }
    }

    /// State with an open database handle.
    pub fn with_database(database: Database) -> Self {
        let mut state = Self::new();
        state.database = Some(database);
        state
    }

    pub(crate) fn database(&self) -> Result<&Database, ClientError> {
        self.database.as_ref().ok_or(ClientError::NoDatabase)
    }

    pub(crate) fn current_username(&self) -> Result<&str, ClientError> {
        self.current_user
            .as_ref()
            .map(|u| u.username.as_str())
            .ok_or(ClientError::NoCurrentUser)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
