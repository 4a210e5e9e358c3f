//! Journal command for Verdant.
//!
//! Adds, removes and lists growth journal entries of a plant.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::output::{DateStyle, OutputOptions};
use crate::config::Config;
use crate::core::{newest_first, JournalEntry};
use crate::error::Result;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Journal action to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalAction {
    /// Append an entry with this text.
    Add(String),
    /// Remove the entry with this id.
    Remove(String),
    /// List entries, newest first.
    List,
}

impl JournalAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::List => "list",
        }
    }
}

/// Output format for the journal command.
#[derive(Debug, Clone, Serialize)]
pub struct JournalOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Action performed.
    pub action: String,
    /// Plant the journal belongs to.
    pub plant_id: String,
    /// Added or removed entry (none if nothing matched), or the full journal for `list` (newest first).
    pub entries: Vec<JournalEntry>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JournalOutput {
    /// Create a successful output.
    pub fn success(
        action: impl Into<String>,
        plant_id: impl Into<String>,
        entries: Vec<JournalEntry>,
    ) -> Self {
        Self {
            success: true,
            action: action.into(),
            plant_id: plant_id.into(),
            entries,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(
        action: impl Into<String>,
        plant_id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            action: action.into(),
            plant_id: plant_id.into(),
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The journal command implementation.
pub struct JournalCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

impl<K: KeyValueStore> JournalCommand<K> {
    /// Create a new journal command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Run the journal command on the plant with `plant_id`.
    pub fn run(&self, plant_id: &str, action: &JournalAction, now: DateTime<Utc>) -> JournalOutput {
        match self.execute(plant_id, action, now) {
            Ok(entries) => JournalOutput::success(action.name(), plant_id, entries),
            Err(e) => JournalOutput::failure(action.name(), plant_id, e.to_string()),
        }
    }

    fn execute(
        &self,
        plant_id: &str,
        action: &JournalAction,
        now: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>> {
        match action {
            JournalAction::Add(text) => {
                Ok(vec![self.garden.add_journal_entry(plant_id, text, now)?])
            }
            JournalAction::Remove(entry_id) => Ok(self
                .garden
                .remove_journal_entry(plant_id, entry_id, now)?
                .into_iter()
                .collect()),
            JournalAction::List => {
                let plant = self.garden.plant(plant_id, now)?;
                Ok(newest_first(&plant.growth_journal)
                    .into_iter()
                    .cloned()
                    .collect())
            }
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &JournalOutput, options: &OutputOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &JournalOutput) -> String {
        if !output.success {
            return format!(
                "Error: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let line = |entry: &JournalEntry| {
            format!(
                "  {}  {}  [{}]\n",
                self.dates.date(entry.timestamp),
                entry.text,
                entry.id
            )
        };

        match output.action.as_str() {
            "add" => {
                let mut text = "Journal entry added:\n".to_string();
                output.entries.iter().for_each(|e| text.push_str(&line(e)));
                text
            }
            "remove" if output.entries.is_empty() => {
                "No journal entry with that id; nothing removed.\n".to_string()
            }
            "remove" => {
                let mut text = "Journal entry removed:\n".to_string();
                output.entries.iter().for_each(|e| text.push_str(&line(e)));
                text
            }
            _ if output.entries.is_empty() => "Journal is empty.\n".to_string(),
            _ => {
                let mut text = format!("Growth journal ({} entries):\n", output.entries.len());
                output.entries.iter().for_each(|e| text.push_str(&line(e)));
                text
            }
        }
    }
}
