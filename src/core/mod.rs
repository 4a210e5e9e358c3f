//! Core types and logic for Verdant.
//!
//! Plants, categories and journals, the care status engine that derives
//! urgency and health, and the overview used for listing. Everything here is
//! pure: callers load records from storage, pass them through, and save the
//! results.

pub mod care;
pub mod category;
pub mod compat;
pub mod journal;
pub mod plant;
pub mod view;

pub use care::{
    evaluate, mark_done, mark_fertilized, mark_watered, refresh, refresh_all, CareAction,
    CareStatus, DayBoundary, HealthBand, VALID_DAY_BOUNDARIES,
};
pub use category::{label_for, Category, NO_CATEGORY_LABEL};
pub use journal::{newest_first, JournalEntry};
pub use plant::{
    generate_id, Plant, PlantDraft, PlantEdit, CREATION_JOURNAL_TEXT, DEFAULT_PERSONAL_NOTES,
    MAX_HEALTH_POINTS,
};
pub use view::{overview, CategoryFilter, PlantSummary, SortOrder, VALID_SORTS};
