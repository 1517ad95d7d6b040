//! JSON snapshot import/export.
//!
//! The snapshot format matches the legacy string-keyed browser storage:
//! camelCase fields and millisecond epoch timestamps, with the user
//! directory stored as a plain serialized list.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mooderia_shared::{Message, User};

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Full snapshot payload — the directory plus the message log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    /// ISO 8601 timestamp of when the snapshot was created.
    pub created_at: String,
    /// App version that produced the snapshot.
    pub version: String,
    pub users: Vec<User>,
    pub messages: Vec<SnapshotMessage>,
}

/// Message as persisted in the legacy snapshot: timestamps are epoch
/// milliseconds, not RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMessage {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub text: String,
    pub timestamp: i64,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub users_imported: usize,
    pub messages_imported: usize,
}

impl Database {
    /// Export the directory and the full log into a serializable struct.
    pub fn export_snapshot(&self) -> Result<SnapshotPayload> {
        let users = self.list_users()?;
        let messages = self
            .list_messages()?
            .into_iter()
            .map(|m| SnapshotMessage {
                id: m.id.to_string(),
                sender: m.sender,
                recipient: m.recipient,
                text: m.text,
                timestamp: m.timestamp.timestamp_millis(),
                read: m.read,
            })
            .collect();

        Ok(SnapshotPayload {
            created_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            users,
            messages,
        })
    }

    /// Import a snapshot, merging with existing data. Existing users are
    /// left untouched; messages are deduplicated by id.
    pub fn import_snapshot(&self, payload: &SnapshotPayload) -> Result<ImportStats> {
        let mut stats = ImportStats::default();

        for user in &payload.users {
            let res = self.conn().execute(
                "INSERT OR IGNORE INTO users (username, display_name, profile_pic, title)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    user.username,
                    user.display_name,
                    user.profile_pic,
                    user.title,
                ],
            );
            if matches!(res, Ok(1)) {
                stats.users_imported += 1;
            }
        }

        for msg in &payload.messages {
            let id = Uuid::parse_str(&msg.id)?;
            let timestamp = chrono::DateTime::from_timestamp_millis(msg.timestamp)
                .ok_or_else(|| {
                    StoreError::InvalidSnapshot(format!(
                        "timestamp out of range: {}",
                        msg.timestamp
                    ))
                })?;

            let message = Message {
                id,
                sender: msg.sender.clone(),
                recipient: msg.recipient.clone(),
                text: msg.text.clone(),
                timestamp,
                read: msg.read,
            };

            let res = self.conn().execute(
                "INSERT OR IGNORE INTO messages (id, sender, recipient, body, timestamp, read)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    message.id.to_string(),
                    message.sender,
                    message.recipient,
                    message.text,
                    message.timestamp.to_rfc3339(),
                    message.read,
                ],
            );
            if matches!(res, Ok(1)) {
                stats.messages_imported += 1;
            }
        }

        tracing::info!(
            users = stats.users_imported,
            messages = stats.messages_imported,
            "snapshot imported"
        );

        Ok(stats)
    }

    /// Serialize the snapshot to a JSON string.
    pub fn export_snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export_snapshot()?)?)
    }

    /// Import a snapshot from a JSON string.
    pub fn import_snapshot_json(&self, json: &str) -> Result<ImportStats> {
        let payload: SnapshotPayload = serde_json::from_str(json)?;
        self.import_snapshot(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_import_round_trip() {
        let src = Database::open_in_memory().unwrap();
        src.upsert_user(&User::new("alice", "Alice")).unwrap();
        src.upsert_user(&User::new("bob", "Bob")).unwrap();
        src.append_message("alice", "bob", "hello").unwrap();

        let json = src.export_snapshot_json().unwrap();

        let dst = Database::open_in_memory().unwrap();
        let stats = dst.import_snapshot_json(&json).unwrap();
        assert_eq!(stats.users_imported, 2);
        assert_eq!(stats.messages_imported, 1);

        let log = dst.list_messages().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].text, "hello");
        assert!(!log[0].read);
    }

    #[test]
    fn import_is_a_merge_not_an_overwrite() {
        let db = Database::open_in_memory().unwrap();
        let mut alice = User::new("alice", "Alice Prime");
        alice.title = Some("Mayor".to_string());
        db.upsert_user(&alice).unwrap();

        let payload = SnapshotPayload {
            created_at: Utc::now().to_rfc3339(),
            version: "test".to_string(),
            users: vec![User::new("alice", "Alice Stale"), User::new("bob", "Bob")],
            messages: vec![],
        };

        let stats = db.import_snapshot(&payload).unwrap();
        assert_eq!(stats.users_imported, 1);
        // The existing record wins.
        assert_eq!(db.get_user("alice").unwrap().display_name, "Alice Prime");
    }

    #[test]
    fn import_deduplicates_messages_by_id() {
        let db = Database::open_in_memory().unwrap();
        let msg = SnapshotMessage {
            id: Uuid::new_v4().to_string(),
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            text: "once".to_string(),
            timestamp: 1_700_000_000_000,
            read: false,
        };
        let payload = SnapshotPayload {
            created_at: Utc::now().to_rfc3339(),
            version: "test".to_string(),
            users: vec![],
            messages: vec![msg.clone(), msg],
        };

        let stats = db.import_snapshot(&payload).unwrap();
        assert_eq!(stats.messages_imported, 1);
        assert_eq!(db.list_messages().unwrap().len(), 1);
    }

    #[test]
    fn legacy_directory_list_parses() {
        // The browser build stored the directory as a bare JSON array.
        let raw = r#"[{"username":"ada","displayName":"Ada L.","title":"Engineer"}]"#;
        let users: Vec<User> = serde_json::from_str(raw).unwrap();
        assert_eq!(users[0].username, "ada");
        assert_eq!(users[0].title.as_deref(), Some("Engineer"));
    }
}
