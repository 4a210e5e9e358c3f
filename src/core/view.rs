//! Overview rows for listing plants: category filter and sort order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::care::{CareStatus, HealthBand};
use crate::core::category::{label_for, Category};
use crate::core::plant::Plant;
use crate::error::VerdantError;

/// Valid values for the sort order.
pub const VALID_SORTS: &[&str] = &["updated", "title", "urgency"];

/// How to order the plant overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently updated first.
    #[default]
    Updated,
    /// Alphabetical by title, case-insensitive.
    Title,
    /// Most outstanding care actions first, then most recently updated.
    Urgency,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Title => "title",
            Self::Urgency => "urgency",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = VerdantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "updated" => Ok(Self::Updated),
            "title" | "name" => Ok(Self::Title),
            "urgency" => Ok(Self::Urgency),
            other => Err(VerdantError::validation(format!(
                "unknown sort order '{}', expected one of {:?}",
                other, VALID_SORTS
            ))),
        }
    }
}

/// Which plants to include in the overview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Only plants referencing this category id.
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => plant.category_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// One line of the plant overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub needs_water: bool,
    pub needs_fertilizer: bool,
    pub health_points: u8,
    pub health: HealthBand,
    pub updated_at: DateTime<Utc>,
}

impl PlantSummary {
    pub fn from_plant(plant: &Plant, categories: &[Category]) -> Self {
        let status = CareStatus::of(plant);
        Self {
            id: plant.id.clone(),
            title: plant.title.clone(),
            category: label_for(categories, plant.category_id.as_deref()).to_string(),
            needs_water: status.needs_water,
            needs_fertilizer: status.needs_fertilizer,
            health_points: status.health_points,
            health: status.band(),
            updated_at: plant.updated_at,
        }
    }

    pub fn urgency(&self) -> u8 {
        u8::from(self.needs_water) + u8::from(self.needs_fertilizer)
    }

    /// Whether any care action is outstanding.
    pub fn needs_attention(&self) -> bool {
        self.needs_water || self.needs_fertilizer
    }
}

fn compare(a: &PlantSummary, b: &PlantSummary, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::Updated => b.updated_at.cmp(&a.updated_at),
        SortOrder::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOrder::Urgency => b
            .urgency()
            .cmp(&a.urgency())
            .then_with(|| b.updated_at.cmp(&a.updated_at)),
    }
}

/// Build the filtered, sorted overview. Plants should already be refreshed.
pub fn overview(
    plants: &[Plant],
    categories: &[Category],
    filter: &CategoryFilter,
    sort: SortOrder,
) -> Vec<PlantSummary> {
    let mut rows: Vec<PlantSummary> = plants
        .iter()
        .filter(|p| filter.matches(p))
        .map(|p| PlantSummary::from_plant(p, categories))
        .collect();
    rows.sort_by(|a, b| compare(a, b, sort));
    rows
}
