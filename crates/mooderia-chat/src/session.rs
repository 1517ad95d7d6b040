//! Peer selection state machine.
//!
//! Two states: no peer selected, or one peer selected. Selecting a peer
//! (or learning that the log changed while one is selected) asks the
//! store to mark that peer's messages read, so an open conversation
//! never shows a stale unread badge. Deselection is the small-viewport
//! "back" navigation and has no side effect.

use tracing::debug;

/// Port to the externally owned message store. The core never mutates
/// the log directly; it requests mutation through these two callbacks.
pub trait ConversationStore {
    /// Append a message from the current user. The store assigns id,
    /// timestamp, and the initial unread flag.
    fn send_message(&self, recipient: &str, text: &str);

    /// Mark every message from `peer` to the current user as read.
    fn mark_read_from(&self, peer: &str);
}

/// Which conversation, if any, is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoPeerSelected,
    PeerSelected(String),
}

/// Lives for the lifetime of the conversation view; no terminal state.
#[derive(Debug, Default)]
pub struct ChatSession {
    selection: Selection,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The currently selected peer, if any.
    pub fn selected_peer(&self) -> Option<&str> {
        match &self.selection {
            Selection::PeerSelected(peer) => Some(peer),
            Selection::NoPeerSelected => None,
        }
    }

    /// Open the conversation with `peer`, emitting exactly one mark-read
    /// signal. Valid from either state, including re-selecting the same
    /// peer.
    pub fn select<S: ConversationStore>(&mut self, peer: &str, store: &S) {
        debug!(peer, "conversation selected");
        self.selection = Selection::PeerSelected(peer.to_string());
        store.mark_read_from(peer);
    }

    /// Close the open conversation. No side effect.
    pub fn deselect(&mut self) {
        self.selection = Selection::NoPeerSelected;
    }

    /// Re-arm the mark-read signal after the underlying log changed.
    ///
    /// New arrivals while a conversation is open are read immediately;
    /// mark-read is idempotent on the store side, so the duplicate
    /// signal for already-read messages is harmless. Fires nothing when
    /// no peer is selected.
    pub fn log_changed<S: ConversationStore>(&self, store: &S) {
        if let Selection::PeerSelected(peer) = &self.selection {
            store.mark_read_from(peer);
        }
    }

    /// Send `text` to the selected peer.
    ///
    /// A UI-level guard, not a validation contract: with no peer
    /// selected, or with text that trims to nothing, this is a silent
    /// no-op. Returns whether a send was issued so the caller knows to
    /// clear its input buffer.
    pub fn send<S: ConversationStore>(&self, text: &str, store: &S) -> bool {
        let Selection::PeerSelected(peer) = &self.selection else {
            return false;
        };
        if text.trim().is_empty() {
            return false;
        }
        store.send_message(peer, text);
        true
    }
}
