//! Community messaging commands.
//!
//! The data flow mirrors the community view: the host selects a
//! citizen, the transcript is derived from the log, sends and
//! mark-reads go through the store callbacks, and every projection is
//! recomputed from the full log on each call.

use serde::Serialize;
use tracing::info;

use mooderia_chat::{conversation_partners, search_directory, transcript, unread_counts};
use mooderia_shared::{Message, User};
use mooderia_store::SessionStore;

use crate::error::ClientError;
use crate::events::{emit, ClientEvent};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub text: String,
    pub timestamp: String,
    pub read: bool,
    /// Whether the signed-in citizen wrote this message.
    pub mine: bool,
}

impl MessageDto {
    fn from_message(m: Message, current_user: &str) -> Self {
        Self {
            id: m.id.to_string(),
            mine: m.sender == current_user,
            sender: m.sender,
            recipient: m.recipient,
            text: m.text,
            timestamp: m.timestamp.to_rfc3339(),
            read: m.read,
        }
    }
}

/// One entry in the conversation sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub user: User,
    pub unread: usize,
}

/// Open the conversation with `username` and return its transcript.
///
/// Selecting marks everything from that citizen read, so the sidebar
/// badge disappears on the next [`list_conversations`] call.
pub fn select_citizen(
    state: &mut AppState,
    username: &str,
) -> Result<Vec<MessageDto>, ClientError> {
    let current_user = state.current_username()?.to_string();
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let store = SessionStore::new(db, current_user.clone());
    state.session.select(username, &store);

    emit(
        state,
        ClientEvent::ConversationRead {
            peer: username.to_string(),
        },
    );

    get_transcript(state)
}

/// Close the open conversation (small-viewport back navigation).
pub fn back_to_list(state: &mut AppState) {
    state.session.deselect();
}

/// Send `text` to the selected citizen. Returns whether a message was
/// actually sent; blank text or a missing selection is a silent no-op,
/// matching the compose-box guard.
pub fn send_message(state: &mut AppState, text: &str) -> Result<bool, ClientError> {
    let current_user = state.current_username()?.to_string();
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let store = SessionStore::new(db, current_user.clone());
    let sent = state.session.send(text, &store);

    if sent {
        let recipient = state
            .session
            .selected_peer()
            .unwrap_or_default()
            .to_string();
        info!(recipient = %recipient, "message sent");
        emit(
            state,
            ClientEvent::NewMessage {
                sender: current_user,
                recipient,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        );
    }

    Ok(sent)
}

/// Re-arm the mark-read side effect after the log changed (for example
/// an incoming message landed while a conversation is open).
pub fn log_changed(state: &AppState) -> Result<(), ClientError> {
    let current_user = state.current_username()?.to_string();
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let store = SessionStore::new(db, current_user);
    state.session.log_changed(&store);
    Ok(())
}

/// The transcript with the selected citizen, oldest first. Empty when
/// nothing is selected.
pub fn get_transcript(state: &AppState) -> Result<Vec<MessageDto>, ClientError> {
    let current_user = state.current_username()?;
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let Some(peer) = state.session.selected_peer() else {
        return Ok(Vec::new());
    };

    let log = db.list_messages()?;
    Ok(transcript(&log, current_user, peer)
        .into_iter()
        .map(|m| MessageDto::from_message(m, current_user))
        .collect())
}

/// Sidebar contents: every citizen the signed-in user has exchanged
/// messages with, plus their unread badge count.
pub fn list_conversations(state: &AppState) -> Result<Vec<ConversationDto>, ClientError> {
    let current_user = state.current_username()?;
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let log = db.list_messages()?;
    let directory = db.list_users()?;

    let mut counts = unread_counts(&log, current_user);
    Ok(conversation_partners(&log, &directory, current_user)
        .into_iter()
        .map(|user| {
            let unread = counts.remove(&user.username).unwrap_or(0);
            ConversationDto { user, unread }
        })
        .collect())
}

/// Substring search over the directory, excluding the signed-in user.
pub fn search_citizens(state: &AppState, term: &str) -> Result<Vec<User>, ClientError> {
    let current_user = state.current_username()?;
    let db = state.database.as_ref().ok_or(ClientError::NoDatabase)?;

    let directory = db.list_users()?;
    Ok(search_directory(&directory, current_user, term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::identity::register_citizen;
    use mooderia_store::Database;

    fn community() -> AppState {
        let mut state = AppState::with_database(Database::open_in_memory().unwrap());
        for (username, name) in [("bob", "Bob"), ("alice", "Alice"), ("carol", "Carol")] {
            state
                .database
                .as_ref()
                .unwrap()
                .upsert_user(&User::new(username, name))
                .unwrap();
        }
        register_citizen(&mut state, User::new("bob", "Bob")).unwrap();
        state
    }

    #[test]
    fn send_and_read_round_trip() {
        let mut state = community();
        let db = state.database.as_ref().unwrap();
        db.append_message("alice", "bob", "hello bob").unwrap();

        let sidebar = list_conversations(&state).unwrap();
        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar[0].user.username, "alice");
        assert_eq!(sidebar[0].unread, 1);

        let transcript = select_citizen(&mut state, "alice").unwrap();
        assert_eq!(transcript.len(), 1);
        assert!(!transcript[0].mine);

        // Opening the conversation cleared the badge.
        let sidebar = list_conversations(&state).unwrap();
        assert_eq!(sidebar[0].unread, 0);

        assert!(send_message(&mut state, "hi alice").unwrap());
        let transcript = get_transcript(&state).unwrap();
        assert_eq!(transcript.len(), 2);
        assert!(transcript[1].mine);
    }

    #[test]
    fn blank_sends_are_silent_no_ops() {
        let mut state = community();

        // Nothing selected yet.
        assert!(!send_message(&mut state, "hello").unwrap());

        select_citizen(&mut state, "alice").unwrap();
        assert!(!send_message(&mut state, "   ").unwrap());

        assert!(state
            .database
            .as_ref()
            .unwrap()
            .list_messages()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn arrival_while_open_is_marked_read_on_rearm() {
        let mut state = community();
        select_citizen(&mut state, "alice").unwrap();

        let db = state.database.as_ref().unwrap();
        db.append_message("alice", "bob", "late arrival").unwrap();
        log_changed(&state).unwrap();

        assert_eq!(db.unread_total("bob").unwrap(), 0);
    }

    #[test]
    fn deselecting_stops_the_rearm() {
        let mut state = community();
        select_citizen(&mut state, "alice").unwrap();
        back_to_list(&mut state);

        let db = state.database.as_ref().unwrap();
        db.append_message("alice", "bob", "unseen").unwrap();
        log_changed(&state).unwrap();

        assert_eq!(db.unread_total("bob").unwrap(), 1);
        assert!(get_transcript(&state).unwrap().is_empty());
    }

    #[test]
    fn search_skips_the_signed_in_citizen() {
        let state = community();
        let hits = search_citizens(&state, "o").unwrap();
        let names: Vec<&str> = hits.iter().map(|u| u.username.as_str()).collect();
        // "bob" matches "o" but is the signed-in user.
        assert_eq!(names, vec!["carol"]);
    }

    #[test]
    fn events_reach_the_subscriber() {
        let mut state = community();
        let (tx, mut rx) = crate::events::event_channel();
        state.event_tx = Some(tx);

        select_citizen(&mut state, "alice").unwrap();
        send_message(&mut state, "hello").unwrap();

        let first = rx.try_recv().unwrap();
        assert!(matches!(first, ClientEvent::ConversationRead { ref peer } if peer == "alice"));
        let second = rx.try_recv().unwrap();
        assert!(matches!(second, ClientEvent::NewMessage { ref recipient, .. } if recipient == "alice"));
    }
}
