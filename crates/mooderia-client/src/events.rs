//! Events pushed to the UI host.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::state::AppState;

pub const EVENT_NEW_MESSAGE: &str = "new-message";
pub const EVENT_CONVERSATION_READ: &str = "conversation-read";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// A message was appended to the log (own or incoming).
    NewMessage {
        sender: String,
        recipient: String,
        timestamp: String,
    },
    /// A conversation was opened and its unread badge cleared.
    ConversationRead { peer: String },
}

pub(crate) fn emit(state: &AppState, event: ClientEvent) {
    let Some(tx) = &state.event_tx else {
        return;
    };
    if let Err(e) = tx.send(event) {
        tracing::error!(error = %e, "Failed to emit event");
    }
}

/// Create the channel a UI host subscribes to.
pub fn event_channel() -> (
    mpsc::UnboundedSender<ClientEvent>,
    mpsc::UnboundedReceiver<ClientEvent>,
) {
    mpsc::unbounded_channel()
}
