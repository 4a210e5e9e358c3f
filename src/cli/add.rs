//! Add command for Verdant.
//!
//! Creates a plant profile. A plant added without an image picks up the
//! staged image, if any.

use chrono::{DateTime, Utc};

use crate::cli::output::{DateStyle, OutputOptions, PlantOutput};
use crate::config::Config;
use crate::core::PlantDraft;
use crate::error::Result;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Input for the add command.
#[derive(Debug, Clone, Default)]
pub struct AddInput {
    pub title: String,
    pub species: String,
    pub location: String,
    /// Category id or label.
    pub category: Option<String>,
    pub water_interval_days: u32,
    pub fertilizer_interval_days: u32,
    pub image: Option<String>,
    pub notes: Option<String>,
}

/// The add command implementation.
pub struct AddCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

impl<K: KeyValueStore> AddCommand<K> {
    /// Create a new add command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Run the add command.
    pub fn run(&self, input: AddInput, now: DateTime<Utc>) -> PlantOutput {
        match self.add(input, now) {
            Ok(output) => output,
            Err(e) => PlantOutput::failure("added", e.to_string()),
        }
    }

    fn add(&self, input: AddInput, now: DateTime<Utc>) -> Result<PlantOutput> {
        let category_id = match input.category.as_deref().map(str::trim) {
            Some(reference) if !reference.is_empty() => {
                Some(self.garden.resolve_category(reference)?.id)
            }
            _ => None,
        };

        let draft = PlantDraft {
            title: input.title,
            species: input.species,
            location: input.location,
            category_id,
            water_interval_days: input.water_interval_days,
            fertilizer_interval_days: input.fertilizer_interval_days,
            image_ref: input.image,
            personal_notes: input.notes,
        };

        let plant = self.garden.add_plant(draft, now)?;
        let category = self.garden.category_label(&plant);
        Ok(PlantOutput::success("added", plant, category))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PlantOutput, options: &OutputOptions) -> String {
        output.format(options, &self.dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DEFAULT_PERSONAL_NOTES, NO_CATEGORY_LABEL};
    use crate::storage::MemoryKeyValueStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn input(title: &str) -> AddInput {
        AddInput {
            title: title.to_string(),
            water_interval_days: 3,
            fertilizer_interval_days: 14,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_basic() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cmd = AddCommand::new(Arc::clone(&store), Config::default());

        let output = cmd.run(input("Monstera"), now());

        assert!(output.success);
        let plant = output.plant.unwrap();
        assert_eq!(plant.title, "Monstera");
        assert_eq!(plant.personal_notes, DEFAULT_PERSONAL_NOTES);
        assert_eq!(output.category.as_deref(), Some(NO_CATEGORY_LABEL));

        let garden = Garden::new(store);
        assert_eq!(garden.store().load_plants().unwrap().len(), 1);
    }

    #[test]
    fn test_add_with_category_label() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let herbs = Garden::new(Arc::clone(&store))
            .create_category("Herbs")
            .unwrap();
        let cmd = AddCommand::new(Arc::clone(&store), Config::default());

        let output = cmd.run(
            AddInput {
                category: Some("herbs".to_string()),
                ..input("Basil")
            },
            now(),
        );

        assert!(output.success);
        assert_eq!(output.category.as_deref(), Some("Herbs"));
        assert_eq!(
            output.plant.unwrap().category_id.as_deref(),
            Some(herbs.id.as_str())
        );
    }

    #[test]
    fn test_add_unknown_category_fails() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cmd = AddCommand::new(Arc::clone(&store), Config::default());

        let output = cmd.run(
            AddInput {
                category: Some("Nowhere".to_string()),
                ..input("Basil")
            },
            now(),
        );

        assert!(!output.success);
        assert!(output.error.unwrap().contains("category not found"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_validation_error() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cmd = AddCommand::new(store, Config::default());

        let output = cmd.run(
            AddInput {
                water_interval_days: 0,
                ..input("Basil")
            },
            now(),
        );

        assert!(!output.success);
        assert_eq!(
            output.error.as_deref(),
            Some("Please enter watering frequency (days)")
        );
    }

    #[test]
    fn test_add_picks_up_staged_image() {
        let store = Arc::new(MemoryKeyValueStore::new());
        Garden::new(Arc::clone(&store))
            .stage_image("data:image/png;base64,AAAA")
            .unwrap();
        let cmd = AddCommand::new(Arc::clone(&store), Config::default());

        let output = cmd.run(input("Aloe"), now());

        assert_eq!(
            output.plant.unwrap().image_ref.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert!(Garden::new(store).staged_image().is_none());
    }
}
