//! Pure projections over the message log.
//!
//! Each function takes the log, the directory, and the current user as
//! explicit inputs and derives a read-only view. Same inputs, same
//! output; no side effects.

use std::collections::{HashMap, HashSet};

use mooderia_shared::{Message, User};

/// Every user the current user has exchanged at least one message with,
/// in directory order.
///
/// A message referencing a username absent from the directory is
/// silently excluded from this view rather than treated as an error.
pub fn conversation_partners(log: &[Message], directory: &[User], current_user: &str) -> Vec<User> {
    let mut partners: HashSet<&str> = HashSet::new();
    for m in log {
        if m.sender == current_user {
            partners.insert(m.recipient.as_str());
        }
        if m.recipient == current_user {
            partners.insert(m.sender.as_str());
        }
    }
    // The current user never counts as their own partner, even if a
    // malformed self-addressed message slipped into the log.
    partners.remove(current_user);

    directory
        .iter()
        .filter(|u| partners.contains(u.username.as_str()))
        .cloned()
        .collect()
}

/// The time-ordered conversation between the current user and one peer.
///
/// Sorted ascending by timestamp; the sort is stable, so equal
/// timestamps keep their log order.
pub fn transcript(log: &[Message], current_user: &str, peer: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = log
        .iter()
        .filter(|m| m.is_between(current_user, peer))
        .cloned()
        .collect();
    messages.sort_by_key(|m| m.timestamp);
    messages
}

/// Per-sender count of unread messages addressed to the current user.
///
/// Peers with nothing unread are absent from the map; callers treat
/// absence as zero.
pub fn unread_counts(log: &[Message], current_user: &str) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for m in log {
        if m.recipient == current_user && !m.read {
            *counts.entry(m.sender.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Case-insensitive substring search over the directory by username or
/// display name. The current user is never included; a blank search
/// term yields nothing.
pub fn search_directory(directory: &[User], current_user: &str, term: &str) -> Vec<User> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    directory
        .iter()
        .filter(|u| {
            u.username != current_user
                && (u.username.to_lowercase().contains(&term)
                    || u.display_name.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}
