//! Water and fertilize commands for Verdant.

use chrono::{DateTime, Utc};

use crate::cli::output::{DateStyle, OutputOptions, PlantOutput};
use crate::config::Config;
use crate::core::CareAction;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Records a care action as done.
pub struct CareCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

fn past_tense(action: CareAction) -> &'static str {
    match action {
        CareAction::Water => "watered",
        CareAction::Fertilize => "fertilized",
    }
}

impl<K: KeyValueStore> CareCommand<K> {
    /// Create a new care command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Mark `action` as done on the plant at `now`.
    pub fn run(&self, id: &str, action: CareAction, now: DateTime<Utc>) -> PlantOutput {
        let result = match action {
            CareAction::Water => self.garden.mark_watered(id, now),
            CareAction::Fertilize => self.garden.mark_fertilized(id, now),
        };
        match result {
            Ok(plant) => {
                let category = self.garden.category_label(&plant);
                PlantOutput::success(past_tense(action), plant, category)
            }
            Err(e) => PlantOutput::failure(past_tense(action), e.to_string()),
        }
    }

    /// Format output based on options.
    ///
    /// Human-readable output is a one-line summary rather than the full card.
    pub fn format_output(&self, output: &PlantOutput, options: &OutputOptions) -> String {
        if options.quiet || options.json || !output.success {
            return output.format(options, &self.dates);
        }
        let Some(plant) = &output.plant else {
            return String::new();
        };

        let mut text = format!(
            "{} {}. Health: {}/100.\n",
            plant.title, output.action, plant.health_points
        );
        if plant.needs_water {
            text.push_str("Still needs water.\n");
        }
        if plant.needs_fertilizer {
            text.push_str("Still needs fertilizer.\n");
        }
        text
    }
}
