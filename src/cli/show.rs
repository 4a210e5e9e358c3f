//! Show command for Verdant.
//!
//! Displays one plant with its care status and growth journal.

use chrono::{DateTime, Utc};

use crate::cli::output::{DateStyle, OutputOptions, PlantOutput};
use crate::config::Config;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// The show command implementation.
pub struct ShowCommand<K: KeyValueStore> {
    garden: Garden<K>,
    dates: DateStyle,
}

impl<K: KeyValueStore> ShowCommand<K> {
    /// Create a new show command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
        }
    }

    /// Run the show command.
    pub fn run(&self, id: &str, now: DateTime<Utc>) -> PlantOutput {
        match self.garden.plant(id, now) {
            Ok(plant) => {
                let category = self.garden.category_label(&plant);
                PlantOutput::success("shown", plant, category)
            }
            Err(e) => PlantOutput::failure("shown", e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PlantOutput, options: &OutputOptions) -> String {
        output.format(options, &self.dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CareConfig;
    use crate::core::{DayBoundary, PlantDraft};
    use crate::storage::MemoryKeyValueStore;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn utc_config() -> Config {
        Config {
            care: CareConfig {
                day_boundary: "utc".to_string(),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_show_refreshes_status() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let garden = Garden::new(Arc::clone(&store)).with_day_boundary(DayBoundary::Utc);
        let plant = garden
            .add_plant(
                PlantDraft {
                    title: "Fern".to_string(),
                    water_interval_days: 3,
                    fertilizer_interval_days: 30,
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        garden.mark_watered(&plant.id, now()).unwrap();
        garden.mark_fertilized(&plant.id, now()).unwrap();

        let cmd = ShowCommand::new(store, utc_config());
        let output = cmd.run(&plant.id, now() + Duration::days(5));

        assert!(output.success);
        let shown = output.plant.unwrap();
        assert!(shown.needs_water);
        assert_eq!(shown.health_points, 80);
    }

    #[test]
    fn test_show_missing_plant() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cmd = ShowCommand::new(store, Config::default());

        let output = cmd.run("nope", now());

        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some("plant not found: nope"));
    }

    #[test]
    fn test_show_human_readable_journal_newest_first() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let garden = Garden::new(Arc::clone(&store)).with_day_boundary(DayBoundary::Utc);
        let plant = garden
            .add_plant(
                PlantDraft {
                    title: "Fern".to_string(),
                    water_interval_days: 3,
                    fertilizer_interval_days: 30,
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        garden
            .add_journal_entry(&plant.id, "Repotted", now() + Duration::days(2))
            .unwrap();

        let cmd = ShowCommand::new(store, utc_config());
        let output = cmd.run(&plant.id, now() + Duration::days(2));
        let text = cmd.format_output(&output, &OutputOptions::default());

        let repotted = text.find("03/02/25  Repotted").unwrap();
        let created = text.find("01/02/25  Plant profile was created!").unwrap();
        assert!(repotted < created);
    }
}
