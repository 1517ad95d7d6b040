//! Binding of the conversation core's store port to [`Database`].
//!
//! The port's callbacks carry no current-user parameter (the UI side
//! only ever says "send to X" / "I opened X's conversation"), so the
//! binding pairs the database with the signed-in username.

use mooderia_chat::ConversationStore;

use crate::database::Database;

/// A [`Database`] scoped to one signed-in user.
pub struct SessionStore<'a> {
    db: &'a Database,
    current_user: String,
}

impl<'a> SessionStore<'a> {
    pub fn new(db: &'a Database, current_user: impl Into<String>) -> Self {
        Self {
            db,
            current_user: current_user.into(),
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn database(&self) -> &Database {
        self.db
    }
}

impl ConversationStore for SessionStore<'_> {
    fn send_message(&self, recipient: &str, text: &str) {
        if let Err(e) = self.db.append_message(&self.current_user, recipient, text) {
            tracing::error!(recipient, error = %e, "failed to append message");
        }
    }

    fn mark_read_from(&self, peer: &str) {
        match self.db.mark_read_from(peer, &self.current_user) {
            Ok(flipped) if flipped > 0 => {
                tracing::debug!(peer, flipped, "conversation marked read");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(peer, error = %e, "failed to mark conversation read"),
        }
    }
}
