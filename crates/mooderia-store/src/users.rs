//! User directory CRUD.
//!
//! Directory order is insertion order (SQLite rowid), which gives the
//! conversation projections a stable, deterministic ordering.

use rusqlite::{params, OptionalExtension};

use mooderia_shared::User;

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    /// Insert a user, or update the profile fields if the username is
    /// already known.
    pub fn upsert_user(&self, user: &User) -> Result<()> {
        self.conn().execute(
            "INSERT INTO users (username, display_name, profile_pic, title)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(username) DO UPDATE SET
                 display_name = excluded.display_name,
                 profile_pic  = excluded.profile_pic,
                 title        = excluded.title",
            params![
                user.username,
                user.display_name,
                user.profile_pic,
                user.title,
            ],
        )?;
        Ok(())
    }

    pub fn get_user(&self, username: &str) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT username, display_name, profile_pic, title
                 FROM users WHERE username = ?1",
                params![username],
                row_to_user,
            )
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    /// The full directory, in insertion order.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(
            "SELECT username, display_name, profile_pic, title
             FROM users ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        username: row.get(0)?,
        display_name: row.get(1)?,
        profile_pic: row.get(2)?,
        title: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get() {
        let db = Database::open_in_memory().unwrap();
        let mut user = User::new("ada", "Ada");
        db.upsert_user(&user).unwrap();

        user.title = Some("Mayor".to_string());
        db.upsert_user(&user).unwrap();

        let loaded = db.get_user("ada").unwrap();
        assert_eq!(loaded.title.as_deref(), Some("Mayor"));
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(db.get_user("ghost"), Err(StoreError::NotFound)));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        for name in ["zoe", "ada", "mel"] {
            db.upsert_user(&User::new(name, name)).unwrap();
        }
        let names: Vec<String> = db
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["zoe", "ada", "mel"]);
    }
}
