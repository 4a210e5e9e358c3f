//! Care status derivation for plants.
//!
//! Given the current time and a plant's cadences and last-serviced
//! timestamps, derive whether the plant needs water or fertilizer and its
//! health points.
//!
//! Rules, applied per axis (water, then fertilizer):
//! 1. Truncate `now` and the last-serviced time to calendar days in `now`'s
//!    time zone. A plant never serviced counts as serviced at the epoch.
//! 2. The axis is due when it was never serviced, when
//!    `days_since >= interval`, or when `interval == 1` and the last service
//!    was not today.
//! 3. The axis decays health when `days_since > interval`, or when
//!    `interval == 1` and `days_since == 1`: `hp = max(0, base - (days_since - interval) * 10)`.
//!    Water starts from 100; fertilizer starts from the water result if water
//!    decayed, otherwise from 100. With no decay the stored value is kept.
//! 4. A plant with neither axis ever serviced has full health.
//!
//! Evaluation is pure: re-running it on its own output with the same `now`
//! changes nothing.

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::plant::{Plant, MAX_HEALTH_POINTS};
use crate::error::VerdantError;

/// Health points lost per day overdue.
pub const DECAY_PER_DAY: i64 = 10;

/// Health below this is critical.
pub const CRITICAL_BELOW: u8 = 30;

/// Health below this (and not critical) needs attention.
pub const WARNING_BELOW: u8 = 50;

/// Derived care status of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareStatus {
    pub needs_water: bool,
    pub needs_fertilizer: bool,
    pub health_points: u8,
}

impl CareStatus {
    /// The status currently cached on a plant.
    pub fn of(plant: &Plant) -> Self {
        Self {
            needs_water: plant.needs_water,
            needs_fertilizer: plant.needs_fertilizer,
            health_points: plant.health_points,
        }
    }

    /// Number of outstanding care actions (0–2).
    pub fn urgency(&self) -> u8 {
        u8::from(self.needs_water) + u8::from(self.needs_fertilizer)
    }

    /// Display band for the health points.
    pub fn band(&self) -> HealthBand {
        HealthBand::from_points(self.health_points)
    }
}

/// Coarse health classification used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

impl HealthBand {
    pub fn from_points(points: u8) -> Self {
        if points < CRITICAL_BELOW {
            Self::Critical
        } else if points < WARNING_BELOW {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// A care action that can be marked as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareAction {
    Water,
    Fertilize,
}

/// Reading of one care axis at a point in time.
#[derive(Debug, Clone, Copy)]
struct AxisReading {
    never: bool,
    today: NaiveDate,
    last_day: NaiveDate,
    days_since: i64,
    interval: i64,
}

impl AxisReading {
    fn new<Tz: TimeZone>(last: Option<DateTime<Utc>>, interval: u32, now: &DateTime<Tz>) -> Self {
        let last = last.filter(|ts| *ts > DateTime::UNIX_EPOCH);
        let last_day = last
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&now.timezone())
            .date_naive();
        let today = now.date_naive();

        Self {
            never: last.is_none(),
            today,
            last_day,
            days_since: (today - last_day).num_days(),
            interval: i64::from(interval),
        }
    }

    fn is_due(&self) -> bool {
        self.never
            || self.days_since >= self.interval
            || (self.interval == 1 && self.today != self.last_day)
    }

    /// Health points lost on this axis, if the decay rule applies.
    fn decay(&self) -> Option<i64> {
        let overdue =
            self.days_since > self.interval || (self.interval == 1 && self.days_since == 1);
        overdue.then(|| (self.days_since - self.interval) * DECAY_PER_DAY)
    }
}

/// Evaluate a plant's care status at `now`.
///
/// Last-serviced timestamps are converted into `now`'s time zone before
/// truncating to days, so pass `Local::now()` for local-calendar semantics
/// or `Utc::now()` for UTC days.
pub fn evaluate<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> CareStatus {
    let water = AxisReading::new(plant.last_watered_at, plant.water_interval_days, now);
    let fertilizer = AxisReading::new(
        plant.last_fertilized_at,
        plant.fertilizer_interval_days,
        now,
    );

    let full = i64::from(MAX_HEALTH_POINTS);
    let mut decayed: Option<i64> = None;
    if let Some(loss) = water.decay() {
        decayed = Some((full - loss).max(0));
    }
    if let Some(loss) = fertilizer.decay() {
        let base = decayed.unwrap_or(full);
        decayed = Some((base - loss).max(0));
    }

    let health_points = if water.never && fertilizer.never {
        MAX_HEALTH_POINTS
    } else {
        match decayed {
            Some(points) => points.clamp(0, full) as u8,
            None => plant.health_points.min(MAX_HEALTH_POINTS),
        }
    };

    CareStatus {
        needs_water: water.is_due(),
        needs_fertilizer: fertilizer.is_due(),
        health_points,
    }
}

/// Write a status onto the plant's cached fields.
pub fn apply(plant: &mut Plant, status: CareStatus) {
    plant.needs_water = status.needs_water;
    plant.needs_fertilizer = status.needs_fertilizer;
    plant.health_points = status.health_points;
}

/// Re-evaluate a plant, writing only when the status changed.
///
/// Returns whether the plant was modified.
pub fn refresh<Tz: TimeZone>(plant: &mut Plant, now: &DateTime<Tz>) -> bool {
    let status = evaluate(plant, now);
    if status == CareStatus::of(plant) {
        return false;
    }
    apply(plant, status);
    true
}

/// Refresh every plant, returning how many changed.
pub fn refresh_all<Tz: TimeZone>(plants: &mut [Plant], now: &DateTime<Tz>) -> usize {
    plants
        .iter_mut()
        .map(|plant| refresh(plant, now))
        .filter(|changed| *changed)
        .count()
}

/// Record a care action as done at `now`.
///
/// Clears the matching need and stamps the service time. Health resets to
/// full only when nothing else is outstanding; a plant still overdue on the
/// other axis keeps its reduced score.
pub fn mark_done(plant: &mut Plant, action: CareAction, now: DateTime<Utc>) -> CareStatus {
    match action {
        CareAction::Water => {
            plant.needs_water = false;
            plant.last_watered_at = Some(now);
        }
        CareAction::Fertilize => {
            plant.needs_fertilizer = false;
            plant.last_fertilized_at = Some(now);
        }
    }

    if !plant.needs_water && !plant.needs_fertilizer {
        plant.health_points = MAX_HEALTH_POINTS;
    }

    CareStatus::of(plant)
}

/// Mark the plant as watered at `now`.
pub fn mark_watered(plant: &mut Plant, now: DateTime<Utc>) -> CareStatus {
    mark_done(plant, CareAction::Water, now)
}

/// Mark the plant as fertilized at `now`.
pub fn mark_fertilized(plant: &mut Plant, now: DateTime<Utc>) -> CareStatus {
    mark_done(plant, CareAction::Fertilize, now)
}

/// Valid values for the day boundary setting.
pub const VALID_DAY_BOUNDARIES: &[&str] = &["local", "utc"];

/// Which calendar decides where one day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

impl DayBoundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Utc => "utc",
        }
    }

    /// Evaluate `plant` at `now` using this calendar.
    pub fn evaluate(&self, plant: &Plant, now: DateTime<Utc>) -> CareStatus {
        match self {
            Self::Local => evaluate(plant, &now.with_timezone(&Local)),
            Self::Utc => evaluate(plant, &now),
        }
    }

    /// Refresh every plant at `now` using this calendar.
    pub fn refresh_all(&self, plants: &mut [Plant], now: DateTime<Utc>) -> usize {
        match self {
            Self::Local => refresh_all(plants, &now.with_timezone(&Local)),
            Self::Utc => refresh_all(plants, &now),
        }
    }
}

impl FromStr for DayBoundary {
    type Err = VerdantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            other => Err(VerdantError::validation(format!(
                "unknown day boundary '{}', expected one of {:?}",
                other, VALID_DAY_BOUNDARIES
            ))),
        }
    }
}
