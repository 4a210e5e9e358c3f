//! Output shared by the plant commands.
//!
//! `add`, `edit`, `show`, `delete`, `water` and `fertilize` all report a
//! single plant, so they share one output type and one human-readable layout.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::core::{newest_first, CareStatus, DayBoundary, Plant};

/// Options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// How dates are rendered in human-readable output.
#[derive(Debug, Clone)]
pub struct DateStyle {
    pub format: String,
    pub day_boundary: DayBoundary,
}

impl DateStyle {
    /// Date style from the display and care settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.date_format(), config.day_boundary())
    }

    pub fn new(format: impl Into<String>, day_boundary: DayBoundary) -> Self {
        Self {
            format: format.into(),
            day_boundary,
        }
    }

    /// Render a timestamp in the configured calendar.
    pub fn date(&self, ts: DateTime<Utc>) -> String {
        match self.day_boundary {
            DayBoundary::Local => ts.with_timezone(&Local).format(&self.format).to_string(),
            DayBoundary::Utc => ts.format(&self.format).to_string(),
        }
    }

    /// Render an optional timestamp, "never" when unset.
    pub fn date_or_never(&self, ts: Option<DateTime<Utc>>) -> String {
        ts.map(|t| self.date(t)).unwrap_or_else(|| "never".to_string())
    }
}

impl Default for DateStyle {
    fn default() -> Self {
        Self::new("%d/%m/%y", DayBoundary::default())
    }
}

/// Output format for commands that report a single plant.
#[derive(Debug, Clone, Serialize)]
pub struct PlantOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// What was done, e.g. "added" or "watered".
    pub action: String,
    /// The plant after the command ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<Plant>,
    /// Resolved category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlantOutput {
    /// Create a successful output.
    pub fn success(action: impl Into<String>, plant: Plant, category: impl Into<String>) -> Self {
        Self {
            success: true,
            action: action.into(),
            plant: Some(plant),
            category: Some(category.into()),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            action: action.into(),
            plant: None,
            category: None,
            error: Some(error.into()),
        }
    }

    /// Format output based on options.
    pub fn format(&self, options: &OutputOptions, dates: &DateStyle) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(dates)
        }
    }

    fn format_human_readable(&self, dates: &DateStyle) -> String {
        match (&self.plant, self.success) {
            (Some(plant), true) => {
                let category = self.category.as_deref().unwrap_or_default();
                let mut out = match self.action.as_str() {
                    "shown" => String::new(),
                    action => format!("Plant {}.\n\n", action),
                };
                out.push_str(&format_plant(plant, category, dates));
                out
            }
            _ => format!(
                "Error: {}\n",
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Full human-readable plant card.
pub fn format_plant(plant: &Plant, category: &str, dates: &DateStyle) -> String {
    let status = CareStatus::of(plant);
    let mut out = String::new();

    if plant.species.is_empty() {
        out.push_str(&format!("{}\n", plant.title));
    } else {
        out.push_str(&format!("{} ({})\n", plant.title, plant.species));
    }
    out.push_str(&format!("  ID:          {}\n", plant.id));
    out.push_str(&format!("  Category:    {}\n", category));
    if !plant.location.is_empty() {
        out.push_str(&format!("  Location:    {}\n", plant.location));
    }
    out.push_str(&format!(
        "  Water:       every {} day(s), last {}{}\n",
        plant.water_interval_days,
        dates.date_or_never(plant.last_watered_at),
        if status.needs_water { "  [needs water]" } else { "" }
    ));
    out.push_str(&format!(
        "  Fertilizer:  every {} day(s), last {}{}\n",
        plant.fertilizer_interval_days,
        dates.date_or_never(plant.last_fertilized_at),
        if status.needs_fertilizer {
            "  [needs fertilizer]"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "  Health:      {}/100 ({})\n",
        status.health_points,
        status.band().as_str()
    ));
    if let Some(image) = &plant.image_ref {
        out.push_str(&format!("  Image:       {}\n", abbreviate(image, 60)));
    }
    out.push_str(&format!("  Updated:     {}\n", dates.date(plant.updated_at)));
    out.push_str(&format!("  Notes:       {}\n", plant.personal_notes));

    out.push_str("\n  Growth journal:\n");
    if plant.growth_journal.is_empty() {
        out.push_str("    (empty)\n");
    }
    for entry in newest_first(&plant.growth_journal) {
        out.push_str(&format!(
            "    {}  {}  [{}]\n",
            dates.date(entry.timestamp),
            entry.text,
            entry.id
        ));
    }

    out
}

/// Shorten long values such as data URLs for display.
pub fn abbreviate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlantDraft;
    use chrono::TimeZone;

    fn utc_dates() -> DateStyle {
        DateStyle::new("%d/%m/%y", DayBoundary::Utc)
    }

    fn plant() -> Plant {
        Plant::create(
            PlantDraft {
                title: "Monstera".to_string(),
                species: "Monstera deliciosa".to_string(),
                water_interval_days: 3,
                fertilizer_interval_days: 14,
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_date_style_formats() {
        let dates = utc_dates();
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();

        assert_eq!(dates.date(ts), "31/12/24");
        assert_eq!(dates.date_or_never(None), "never");
    }

    #[test]
    fn test_plant_output_success() {
        let output = PlantOutput::success("added", plant(), "Tropical");

        assert!(output.success);
        assert_eq!(output.category.as_deref(), Some("Tropical"));
        assert!(output.error.is_none());
    }

    #[test]
    fn test_plant_output_failure() {
        let output = PlantOutput::failure("added", "Please enter a plant name");

        assert!(!output.success);
        assert!(output.plant.is_none());
        assert_eq!(output.error.as_deref(), Some("Please enter a plant name"));
    }

    #[test]
    fn test_format_quiet() {
        let output = PlantOutput::success("added", plant(), "Tropical");
        let options = OutputOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(output.format(&options, &utc_dates()).is_empty());
    }

    #[test]
    fn test_format_json() {
        let output = PlantOutput::success("watered", plant(), "Tropical");
        let options = OutputOptions {
            json: true,
            ..Default::default()
        };

        let formatted = output.format(&options, &utc_dates());
        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();

        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["action"], "watered");
        assert_eq!(parsed["plant"]["title"], "Monstera");
        assert_eq!(parsed["plant"]["waterIntervalDays"], 3);
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_format_human_readable() {
        let output = PlantOutput::success("added", plant(), "Tropical");
        let formatted = output.format(&OutputOptions::default(), &utc_dates());

        assert!(formatted.starts_with("Plant added."));
        assert!(formatted.contains("Monstera (Monstera deliciosa)"));
        assert!(formatted.contains("Category:    Tropical"));
        assert!(formatted.contains("last never"));
        assert!(formatted.contains("Health:      100/100 (healthy)"));
        assert!(formatted.contains("10/03/25  Plant profile was created!"));
    }

    #[test]
    fn test_format_shown_has_no_banner() {
        let output = PlantOutput::success("shown", plant(), "Tropical");
        let formatted = output.format(&OutputOptions::default(), &utc_dates());
        assert!(formatted.starts_with("Monstera"));
    }

    #[test]
    fn test_format_failure() {
        let output = PlantOutput::failure("watered", "plant not found: x");
        let formatted = output.format(&OutputOptions::default(), &utc_dates());
        assert_eq!(formatted, "Error: plant not found: x\n");
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("short", 10), "short");
        assert_eq!(abbreviate("data:image/png;base64,AAAA", 10), "data:image...");
    }
}
