//! Growth journal entries and the operations on a plant's journal.
//!
//! Storage order is insertion order. Display order (newest first) is
//! computed on read by [`newest_first`] and never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::compat::timestamp;
use crate::core::plant::{generate_id, Plant};
use crate::error::{Result, VerdantError};

/// A timestamped free-text note attached to a plant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// Unique within the owning plant.
    pub id: String,
    #[serde(alias = "d", with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
}

impl JournalEntry {
    /// Create an entry with a fresh id.
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            timestamp,
            text: text.into(),
        }
    }
}

/// Append an entry to the plant's journal and bump `updated_at`.
///
/// Fails with a validation error when `text` is blank.
pub fn append<'a>(
    plant: &'a mut Plant,
    text: &str,
    now: DateTime<Utc>,
) -> Result<&'a JournalEntry> {
    if text.trim().is_empty() {
        return Err(VerdantError::validation("Journal entry cannot be empty"));
    }

    let mut entry = JournalEntry::new(text, now);
    while plant.growth_journal.iter().any(|e| e.id == entry.id) {
        entry.id = generate_id();
    }

    plant.growth_journal.push(entry);
    plant.touch(now);

    let last = plant.growth_journal.len() - 1;
    Ok(&plant.growth_journal[last])
}

/// Remove the entry with `entry_id`.
///
/// Returns the removed entry. An unknown id is a no-op and leaves
/// `updated_at` untouched.
pub fn remove(plant: &mut Plant, entry_id: &str, now: DateTime<Utc>) -> Option<JournalEntry> {
    let index = plant.growth_journal.iter().position(|e| e.id == entry_id)?;
    let removed = plant.growth_journal.remove(index);
    plant.touch(now);
    Some(removed)
}

/// Entries in display order: most recent first, ties keep insertion order.
pub fn newest_first(journal: &[JournalEntry]) -> Vec<&JournalEntry> {
    let mut entries: Vec<&JournalEntry> = journal.iter().collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}
