//! Core domain model structs.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase
//! field names so it round-trips against the legacy snapshot format
//! and can be handed directly to a UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A known user (a "citizen"). The `username` is the stable unique key;
/// everything else is presentational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, stable identifier.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Opaque reference to a profile picture (data URL or blob id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    /// Optional honorific shown in the conversation list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            profile_pic: None,
            title: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single direct message between two users.
///
/// `timestamp` is assigned by the store at append time and is used only
/// for ordering. `read` is flipped exclusively by the mark-read
/// operation, never by send.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// Username of the sender.
    pub sender: String,
    /// Username of the recipient.
    pub recipient: String,
    /// Message body, arbitrary and unvalidated.
    pub text: String,
    /// When the message was appended to the log.
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has opened the conversation since arrival.
    pub read: bool,
}

impl Message {
    /// True if this message travels between `a` and `b`, in either
    /// direction.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(sender: &str, recipient: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            text: "hi".to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            read: false,
        }
    }

    #[test]
    fn is_between_ignores_direction() {
        let m = msg("alice", "bob");
        assert!(m.is_between("alice", "bob"));
        assert!(m.is_between("bob", "alice"));
        assert!(!m.is_between("alice", "carol"));
    }

    #[test]
    fn user_serializes_camel_case() {
        let mut u = User::new("ada", "Ada L.");
        u.title = Some("Mayor".to_string());
        let json = serde_json::to_value(&u).unwrap();
        assert_eq!(json["displayName"], "Ada L.");
        assert_eq!(json["title"], "Mayor");
        assert!(json.get("profilePic").is_none());
    }

    #[test]
    fn user_deserializes_without_optional_fields() {
        let u: User =
            serde_json::from_str(r#"{"username":"ada","displayName":"Ada L."}"#).unwrap();
        assert_eq!(u.username, "ada");
        assert!(u.profile_pic.is_none());
        assert!(u.title.is_none());
    }
}
