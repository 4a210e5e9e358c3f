//! List command for Verdant.
//!
//! Lists plants with their care status, optionally filtered by category and
//! sorted by recency, title or urgency.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::output::{abbreviate, DateStyle};
use crate::config::Config;
use crate::core::{CategoryFilter, PlantSummary, SortOrder};
use crate::error::Result;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Sort order (default from config).
    pub sort: Option<SortOrder>,
    /// Only plants in this category (id or label).
    pub category: Option<String>,
    /// Only plants with an outstanding care action.
    pub needs_care: bool,
    /// Maximum number of rows.
    pub limit: Option<usize>,
}

/// Output format for the list command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Whether the list was successful.
    pub success: bool,
    /// Number of plants listed.
    pub count: usize,
    /// Sort order applied.
    pub sort: SortOrder,
    /// The plants.
    pub plants: Vec<PlantSummary>,
    /// Error message if listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListOutput {
    /// Create a successful output.
    pub fn success(plants: Vec<PlantSummary>, sort: SortOrder) -> Self {
        Self {
            success: true,
            count: plants.len(),
            sort,
            plants,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            sort: SortOrder::default(),
            plants: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The list command implementation.
pub struct ListCommand<K: KeyValueStore> {
    garden: Garden<K>,
    config: Config,
    dates: DateStyle,
}

impl<K: KeyValueStore> ListCommand<K> {
    /// Create a new list command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
            dates: DateStyle::from_config(&config),
            config,
        }
    }

    /// Run the list command.
    pub fn run(&self, options: &ListOptions, now: DateTime<Utc>) -> ListOutput {
        match self.list(options, now) {
            Ok(output) => output,
            Err(e) => ListOutput::failure(e.to_string()),
        }
    }

    fn list(&self, options: &ListOptions, now: DateTime<Utc>) -> Result<ListOutput> {
        let sort = options.sort.unwrap_or_else(|| self.config.default_sort());
        let filter = match options.category.as_deref() {
            Some(reference) => CategoryFilter::Only(self.garden.resolve_category(reference)?.id),
            None => CategoryFilter::All,
        };

        let mut rows = self.garden.overview(&filter, sort, now)?;
        if options.needs_care {
            rows.retain(PlantSummary::needs_attention);
        }
        if let Some(limit) = options.limit {
            rows.truncate(limit);
        }

        Ok(ListOutput::success(rows, sort))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ListOutput, options: &ListOptions) -> String {
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
    fn format_human_readable(&self, output: &ListOutput) -> String {
        if !output.success {
            return format!(
                "Error: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.plants.is_empty() {
            return "No plants found.\n".to_string();
        }

        let mut text = format!("Plants ({}, by {}):\n\n", output.count, output.sort);
        for row in &output.plants {
            let mut needs = Vec::new();
            if row.needs_water {
                needs.push("water");
            }
            if row.needs_fertilizer {
                needs.push("fertilize");
            }
            let needs = if needs.is_empty() {
                "-".to_string()
            } else {
                needs.join(", ")
            };

            text.push_str(&format!(
                "  {:<24} {:<16} {:<17} {:>3}/100 {:<8}  {}  {}\n",
                abbreviate(&row.title, 24),
                abbreviate(&row.category, 16),
                needs,
                row.health_points,
                row.health.as_str(),
                self.dates.date(row.updated_at),
                row.id
            ));
        }
        text
    }
}
