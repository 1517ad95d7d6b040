//! Sign-in and directory commands.

use tracing::info;

use mooderia_shared::User;
use mooderia_store::ImportStats;

use crate::error::ClientError;
use crate::state::AppState;

/// Register a new citizen and sign them in.
pub fn register_citizen(state: &mut AppState, user: User) -> Result<(), ClientError> {
    state.database()?.upsert_user(&user)?;
    info!(username = %user.username, "citizen registered");
    state.current_user = Some(user);
    Ok(())
}

/// Sign in an existing citizen by username.
pub fn login(state: &mut AppState, username: &str) -> Result<User, ClientError> {
    let user = state.database()?.get_user(username)?;
    info!(username = %user.username, "citizen signed in");
    state.current_user = Some(user.clone());
    Ok(user)
}

/// The signed-in citizen, if any.
pub fn current_citizen(state: &AppState) -> Option<&User> {
    state.current_user.as_ref()
}

/// Merge a JSON snapshot (directory + log) into the local database.
pub fn import_snapshot(state: &AppState, json: &str) -> Result<ImportStats, ClientError> {
    Ok(state.database()?.import_snapshot_json(json)?)
}

/// Export the local database as a JSON snapshot.
pub fn export_snapshot(state: &AppState) -> Result<String, ClientError> {
    Ok(state.database()?.export_snapshot_json()?)
}
