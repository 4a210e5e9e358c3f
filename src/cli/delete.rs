//! Delete command for Verdant.
//!
//! Removes a plant profile. Confirmation is handled by the caller.

use crate::cli::output::{DateStyle, OutputOptions, PlantOutput};
use crate::config::Config;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// The delete command implementation.
pub struct DeleteCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

impl<K: KeyValueStore> DeleteCommand<K> {
    /// Create a new delete command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Run the delete command.
    pub fn run(&self, id: &str) -> PlantOutput {
        match self.garden.delete_plant(id) {
            Ok(plant) => {
                let category = self.garden.category_label(&plant);
                PlantOutput::success("deleted", plant, category)
            }
            Err(e) => PlantOutput::failure("deleted", e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PlantOutput, options: &OutputOptions) -> String {
        if options.quiet || options.json || !output.success {
            return output.format(options, &self.dates);
        }
        match &output.plant {
            Some(plant) => format!("Deleted plant '{}' ({}).\n", plant.title, plant.id),
            None => String::new(),
        }
    }
}
