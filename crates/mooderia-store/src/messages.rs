//! Message log operations.
//!
//! The log is append-only from the application's point of view: send
//! appends, mark-read flips the `read` flag, nothing else mutates it.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use mooderia_shared::Message;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Append a new message. The store assigns id and timestamp and the
    /// message starts unread; the caller supplies only sender,
    /// recipient, and body.
    pub fn append_message(&self, sender: &str, recipient: &str, text: &str) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
            read: false,
        };
        self.insert_message(&message)?;
        Ok(message)
    }

    /// Insert a fully formed message (snapshot import, tests).
    pub fn insert_message(&self, message: &Message) -> Result<()> {
        self.conn().execute(
            "INSERT INTO messages (id, sender, recipient, body, timestamp, read)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message.id.to_string(),
                message.sender,
                message.recipient,
                message.text,
                message.timestamp.to_rfc3339(),
                message.read,
            ],
        )?;
        Ok(())
    }

    /// The full log in insertion order. The conversation projections
    /// filter and sort it themselves.
    pub fn list_messages(&self) -> Result<Vec<Message>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, sender, recipient, body, timestamp, read
             FROM messages ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    /// Mark every message from `peer` to `recipient` as read. Returns
    /// the number of messages flipped; already-read messages are left
    /// alone, so calling this twice is the same as calling it once.
    pub fn mark_read_from(&self, peer: &str, recipient: &str) -> Result<usize> {
        let flipped = self.conn().execute(
            "UPDATE messages SET read = 1
             WHERE sender = ?1 AND recipient = ?2 AND read = 0",
            params![peer, recipient],
        )?;
        Ok(flipped)
    }

    /// Total unread messages addressed to `recipient`, across all peers.
    pub fn unread_total(&self, recipient: &str) -> Result<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM messages WHERE recipient = ?1 AND read = 0",
            params![recipient],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let id_str: String = row.get(0)?;
    let ts_str: String = row.get(4)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Message {
        id,
        sender: row.get(1)?,
        recipient: row.get(2)?,
        text: row.get(3)?,
        timestamp,
        read: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mooderia_chat::unread_counts;

    #[test]
    fn append_assigns_id_timestamp_and_unread() {
        let db = Database::open_in_memory().unwrap();
        let sent = db.append_message("alice", "bob", "hi").unwrap();
        assert!(!sent.read);

        let log = db.list_messages().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0], sent);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        db.append_message("alice", "bob", "one").unwrap();
        db.append_message("bob", "alice", "two").unwrap();
        db.append_message("alice", "bob", "three").unwrap();

        let bodies: Vec<String> = db
            .list_messages()
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(bodies, vec!["one", "two", "three"]);
    }

    #[test]
    fn mark_read_flips_only_the_peers_inbound_messages() {
        let db = Database::open_in_memory().unwrap();
        db.append_message("alice", "bob", "a1").unwrap();
        db.append_message("carol", "bob", "c1").unwrap();
        db.append_message("bob", "alice", "b1").unwrap();

        let flipped = db.mark_read_from("alice", "bob").unwrap();
        assert_eq!(flipped, 1);

        let counts = unread_counts(&db.list_messages().unwrap(), "bob");
        assert_eq!(counts.get("alice"), None);
        assert_eq!(counts.get("carol"), Some(&1));

        // bob's own outbound message to alice is untouched.
        assert_eq!(db.unread_total("alice").unwrap(), 1);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.append_message("alice", "bob", "hello").unwrap();

        assert_eq!(db.mark_read_from("alice", "bob").unwrap(), 1);
        assert_eq!(db.mark_read_from("alice", "bob").unwrap(), 0);

        let log = db.list_messages().unwrap();
        assert!(log[0].read);
    }

    #[test]
    fn unread_total_spans_all_peers() {
        let db = Database::open_in_memory().unwrap();
        db.append_message("alice", "bob", "a").unwrap();
        db.append_message("carol", "bob", "b").unwrap();
        db.append_message("bob", "carol", "c").unwrap();
        assert_eq!(db.unread_total("bob").unwrap(), 2);
    }
}
