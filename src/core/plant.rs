//! Plant records and the add/edit flows that produce them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::compat::{interval, optional_timestamp, timestamp};
use crate::core::journal::JournalEntry;
use crate::error::{Result, VerdantError};

/// Personal notes placeholder for plants created without notes.
pub const DEFAULT_PERSONAL_NOTES: &str = "Add your personal notes here!";

/// Text of the journal entry recorded when a plant is created.
pub const CREATION_JOURNAL_TEXT: &str = "Plant profile was created!";

/// Health points of a plant that is fully caught up.
pub const MAX_HEALTH_POINTS: u8 = 100;

/// Generate a fresh opaque identifier.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A tracked plant.
///
/// `needs_water`, `needs_fertilizer` and `health_points` are cached outputs
/// of the care engine; see [`crate::core::care`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    #[serde(alias = "water", with = "interval")]
    pub water_interval_days: u32,
    #[serde(alias = "fertilizer", with = "interval")]
    pub fertilizer_interval_days: u32,
    #[serde(default, alias = "lastWater", with = "optional_timestamp")]
    pub last_watered_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "lastFertilizer", with = "optional_timestamp")]
    pub last_fertilized_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "isWater")]
    pub needs_water: bool,
    #[serde(default, alias = "isFertilizer")]
    pub needs_fertilizer: bool,
    #[serde(default = "full_health", alias = "hp")]
    pub health_points: u8,
    #[serde(default, alias = "imageUrl")]
    pub image_ref: Option<String>,
    #[serde(default = "epoch", with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_personal_notes")]
    pub personal_notes: String,
    #[serde(default)]
    pub growth_journal: Vec<JournalEntry>,
}

fn full_health() -> u8 {
    MAX_HEALTH_POINTS
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

fn default_personal_notes() -> String {
    DEFAULT_PERSONAL_NOTES.to_string()
}

/// Input for the "add plant" action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantDraft {
    pub title: String,
    pub species: String,
    pub location: String,
    pub category_id: Option<String>,
    pub water_interval_days: u32,
    pub fertilizer_interval_days: u32,
    pub image_ref: Option<String>,
    pub personal_notes: Option<String>,
}

/// Partial update for the "edit plant" action. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantEdit {
    pub title: Option<String>,
    pub species: Option<String>,
    pub location: Option<String>,
    /// `Some(None)` clears the category.
    pub category_id: Option<Option<String>>,
    pub water_interval_days: Option<u32>,
    pub fertilizer_interval_days: Option<u32>,
    /// `Some(None)` removes the image.
    pub image_ref: Option<Option<String>>,
    pub personal_notes: Option<String>,
}

impl PlantEdit {
    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == PlantEdit::default()
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(VerdantError::validation("Please enter a plant name"));
    }
    Ok(())
}

fn validate_water_interval(days: u32) -> Result<()> {
    if days < 1 {
        return Err(VerdantError::validation(
            "Please enter watering frequency (days)",
        ));
    }
    Ok(())
}

fn validate_fertilizer_interval(days: u32) -> Result<()> {
    if days < 1 {
        return Err(VerdantError::validation(
            "Please enter fertilizer frequency (days)",
        ));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Plant {
    /// Create a plant from a validated draft.
    ///
    /// The plant starts with both care dates unset, full health, and one
    /// journal entry recording its creation.
    pub fn create(draft: PlantDraft, now: DateTime<Utc>) -> Result<Self> {
        validate_title(&draft.title)?;
        validate_water_interval(draft.water_interval_days)?;
        validate_fertilizer_interval(draft.fertilizer_interval_days)?;

        let personal_notes = draft
            .personal_notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(default_personal_notes);

        Ok(Self {
            id: generate_id(),
            title: draft.title.trim().to_string(),
            species: draft.species,
            location: draft.location,
            category_id: non_blank(draft.category_id),
            water_interval_days: draft.water_interval_days,
            fertilizer_interval_days: draft.fertilizer_interval_days,
            last_watered_at: None,
            last_fertilized_at: None,
            needs_water: false,
            needs_fertilizer: false,
            health_points: MAX_HEALTH_POINTS,
            image_ref: non_blank(draft.image_ref),
            updated_at: now,
            personal_notes,
            growth_journal: vec![JournalEntry::new(CREATION_JOURNAL_TEXT, now)],
        })
    }

    /// Apply an edit. Nothing is changed if validation fails.
    pub fn apply_edit(&mut self, edit: PlantEdit, now: DateTime<Utc>) -> Result<()> {
        if let Some(title) = &edit.title {
            validate_title(title)?;
        }
        if let Some(days) = edit.water_interval_days {
            validate_water_interval(days)?;
        }
        if let Some(days) = edit.fertilizer_interval_days {
            validate_fertilizer_interval(days)?;
        }

        if let Some(title) = edit.title {
            self.title = title.trim().to_string();
        }
        if let Some(species) = edit.species {
            self.species = species;
        }
        if let Some(location) = edit.location {
            self.location = location;
        }
        if let Some(category_id) = edit.category_id {
            self.category_id = non_blank(category_id);
        }
        if let Some(days) = edit.water_interval_days {
            self.water_interval_days = days;
        }
        if let Some(days) = edit.fertilizer_interval_days {
            self.fertilizer_interval_days = days;
        }
        if let Some(image_ref) = edit.image_ref {
            self.image_ref = non_blank(image_ref);
        }
        if let Some(notes) = edit.personal_notes {
            self.personal_notes = notes.trim().to_string();
        }
        self.updated_at = now;
        Ok(())
    }

    /// Bump the last-modified timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Find a journal entry by id.
    pub fn journal_entry(&self, entry_id: &str) -> Option<&JournalEntry> {
        self.growth_journal.iter().find(|e| e.id == entry_id)
    }
}
