//! Verdant - plant care tracker
//!
//! Verdant keeps a local record of your plants, derives when each one needs
//! water or fertilizer, scores its health from how overdue that care is, and
//! keeps a growth journal per plant.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

pub use config::Config;
pub use core::{
    CareAction, CareStatus, Category, CategoryFilter, DayBoundary, HealthBand, JournalEntry,
    Plant, PlantDraft, PlantEdit, PlantSummary, SortOrder,
};
pub use error::{Result, VerdantError};
pub use service::Garden;
pub use storage::{EntityStore, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

// CLI commands
pub use cli::{
    AddCommand, CareCommand, CategoryCommand, DeleteCommand, EditCommand, ImageCommand,
    JournalCommand, ListCommand, ShowCommand,
};
