//! v001 -- Initial schema creation.
//!
//! Creates the two core tables: `users` and `messages`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users (the citizen directory)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    username     TEXT PRIMARY KEY NOT NULL,
    display_name TEXT NOT NULL,
    profile_pic  TEXT                         -- opaque reference, nullable
);

-- ----------------------------------------------------------------
-- Messages (append-only direct-message log)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS messages (
    id        TEXT PRIMARY KEY NOT NULL,      -- UUID v4
    sender    TEXT NOT NULL,                  -- username
    recipient TEXT NOT NULL,                  -- username
    body      TEXT NOT NULL,
    timestamp TEXT NOT NULL,                  -- ISO-8601 / RFC-3339
    read      INTEGER NOT NULL DEFAULT 0      -- boolean 0/1
);

CREATE INDEX IF NOT EXISTS idx_messages_recipient_read
    ON messages(recipient, read);

CREATE INDEX IF NOT EXISTS idx_messages_sender
    ON messages(sender);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
