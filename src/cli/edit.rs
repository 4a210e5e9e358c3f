//! Edit command for Verdant.
//!
//! Updates a plant's descriptive fields or care cadence. Fields not given
//! are left as they are.

use chrono::{DateTime, Utc};

use crate::cli::output::{DateStyle, OutputOptions, PlantOutput};
use crate::config::Config;
use crate::core::PlantEdit;
use crate::error::{Result, VerdantError};
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Input for the edit command.
#[derive(Debug, Clone, Default)]
pub struct EditInput {
    pub title: Option<String>,
    pub species: Option<String>,
    pub location: Option<String>,
    /// Category id or label.
    pub category: Option<String>,
    /// Remove the category reference.
    pub clear_category: bool,
    pub water_interval_days: Option<u32>,
    pub fertilizer_interval_days: Option<u32>,
    pub image: Option<String>,
    /// Remove the image.
    pub clear_image: bool,
    pub notes: Option<String>,
}

/// The edit command implementation.
pub struct EditCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

impl<K: KeyValueStore> EditCommand<K> {
    /// Create a new edit command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Run the edit command.
    pub fn run(&self, id: &str, input: EditInput, now: DateTime<Utc>) -> PlantOutput {
        match self.edit(id, input, now) {
            Ok(output) => output,
            Err(e) => PlantOutput::failure("edited", e.to_string()),
        }
    }

    fn edit(&self, id: &str, input: EditInput, now: DateTime<Utc>) -> Result<PlantOutput> {
        let category_id = if input.clear_category {
            Some(None)
        } else {
            match input.category {
                Some(reference) => Some(Some(self.garden.resolve_category(&reference)?.id)),
                None => None,
            }
        };
        let image_ref = if input.clear_image {
            Some(None)
        } else {
            input.image.map(Some)
        };

        let edit = PlantEdit {
            title: input.title,
            species: input.species,
            location: input.location,
            category_id,
            water_interval_days: input.water_interval_days,
            fertilizer_interval_days: input.fertilizer_interval_days,
            image_ref,
            personal_notes: input.notes,
        };
        if edit.is_empty() {
            return Err(VerdantError::validation("Nothing to edit"));
        }

        let plant = self.garden.edit_plant(id, edit, now)?;
        let category = self.garden.category_label(&plant);
        Ok(PlantOutput::success("edited", plant, category))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PlantOutput, options: &OutputOptions) -> String {
        output.format(options, &self.dates)
    }
}
