//! v002 -- Adds the optional honorific title to user profiles.

use rusqlite::Connection;

const UP_SQL: &str = r#"
ALTER TABLE users ADD COLUMN title TEXT;
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
