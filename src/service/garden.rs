//! Garden use-case service.
//!
//! # Responsibility
//! - Run each user action as load, mutate, save over the entity store.
//! - Keep cached care status current on every read.
//!
//! # Invariants
//! - New plants are stored first (newest first); categories are appended.
//! - A rejected action (validation or missing record) saves nothing.
//! - Reads write back only when a plant's care status actually changed.
//!
//! Read-modify-write is not atomic across processes: two writers racing on
//! the same collection lose the earlier update.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::core::care::{self, CareAction};
use crate::core::{
    category, journal, label_for, overview, Category, CategoryFilter, DayBoundary, JournalEntry,
    Plant, PlantDraft, PlantEdit, PlantSummary, SortOrder,
};
use crate::error::{FailOpen, Result, VerdantError};
use crate::storage::{EntityStore, KeyValueStore};

/// Plant-care facade over a key-value store.
#[derive(Debug)]
pub struct Garden<K: KeyValueStore> {
    store: EntityStore<K>,
    day_boundary: DayBoundary,
}

impl<K: KeyValueStore> Garden<K> {
    /// Creates a garden over the provided store, using local calendar days.
    pub fn new(kv: K) -> Self {
        Self {
            store: EntityStore::new(kv),
            day_boundary: DayBoundary::default(),
        }
    }

    /// Creates a garden using the configured day boundary.
    pub fn with_config(kv: K, config: &Config) -> Self {
        Self::new(kv).with_day_boundary(config.day_boundary())
    }

    /// Use a different calendar for day truncation.
    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// The typed store backing this garden.
    pub fn store(&self) -> &EntityStore<K> {
        &self.store
    }

    // =========================================================================
    // Plants
    // =========================================================================

    /// All plants with care status evaluated at `now`, in stored order.
    pub fn plants(&self, now: DateTime<Utc>) -> Result<Vec<Plant>> {
        let mut plants = self.store.load_plants()?;
        let changed = self.day_boundary.refresh_all(&mut plants, now);
        if changed > 0 {
            tracing::debug!(changed, "care status changed, saving plants");
            self.store.save_plants(&plants)?;
        }
        Ok(plants)
    }

    /// One plant with care status evaluated at `now`.
    pub fn plant(&self, id: &str, now: DateTime<Utc>) -> Result<Plant> {
        self.plants(now)?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| VerdantError::plant_not_found(id))
    }

    /// Add a plant.
    ///
    /// A draft without an image picks up the staged image, which is then
    /// cleared.
    pub fn add_plant(&self, mut draft: PlantDraft, now: DateTime<Utc>) -> Result<Plant> {
        let staged = self.store.load_staged_image();
        let uses_staged = draft.image_ref.as_deref().is_none_or(|r| r.trim().is_empty());
        if uses_staged {
            draft.image_ref = staged.clone();
        }

        let mut plant = Plant::create(draft, now)?;
        let status = self.day_boundary.evaluate(&plant, now);
        care::apply(&mut plant, status);

        let mut plants = self.plants(now)?;
        plants.insert(0, plant.clone());
        self.store.save_plants(&plants)?;

        if uses_staged && staged.is_some() {
            self.store.clear_staged_image()?;
        }

        tracing::info!(id = %plant.id, title = %plant.title, "added plant");
        Ok(plant)
    }

    /// Edit a plant's descriptive fields or cadence.
    pub fn edit_plant(&self, id: &str, edit: PlantEdit, now: DateTime<Utc>) -> Result<Plant> {
        let day_boundary = self.day_boundary;
        let (plant, ()) = self.update_plant(id, now, |plant| {
            plant.apply_edit(edit, now)?;
            let status = day_boundary.evaluate(plant, now);
            care::apply(plant, status);
            Ok(())
        })?;
        tracing::info!(id, "edited plant");
        Ok(plant)
    }

    /// Delete a plant, returning it.
    pub fn delete_plant(&self, id: &str) -> Result<Plant> {
        let mut plants = self.store.load_plants()?;
        let index = plants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| VerdantError::plant_not_found(id))?;
        let removed = plants.remove(index);
        self.store.save_plants(&plants)?;
        tracing::info!(id, title = %removed.title, "deleted plant");
        Ok(removed)
    }

    pub fn mark_watered(&self, id: &str, now: DateTime<Utc>) -> Result<Plant> {
        self.mark_done(id, CareAction::Water, now)
    }

    pub fn mark_fertilized(&self, id: &str, now: DateTime<Utc>) -> Result<Plant> {
        self.mark_done(id, CareAction::Fertilize, now)
    }

    fn mark_done(&self, id: &str, action: CareAction, now: DateTime<Utc>) -> Result<Plant> {
        let (plant, _) =
            self.update_plant(id, now, |plant| Ok(care::mark_done(plant, action, now)))?;
        tracing::info!(id, ?action, health = plant.health_points, "care action done");
        Ok(plant)
    }

    // =========================================================================
    // Journal
    // =========================================================================

    /// Append a journal entry to a plant.
    pub fn add_journal_entry(
        &self,
        id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry> {
        let (_, entry) =
            self.update_plant(id, now, |plant| Ok(journal::append(plant, text, now)?.clone()))?;
        tracing::info!(id, entry = %entry.id, "added journal entry");
        Ok(entry)
    }

    /// Remove a journal entry from a plant.
    ///
    /// An unknown entry id removes nothing and saves nothing.
    pub fn remove_journal_entry(
        &self,
        id: &str,
        entry_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>> {
        let mut plants = self.plants(now)?;
        let plant = plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| VerdantError::plant_not_found(id))?;

        let Some(entry) = journal::remove(plant, entry_id, now) else {
            tracing::debug!(id, entry = entry_id, "journal entry not present, nothing removed");
            return Ok(None);
        };
        self.store.save_plants(&plants)?;
        tracing::info!(id, entry = %entry.id, "removed journal entry");
        Ok(Some(entry))
    }

    /// Load, mutate and save one plant. Nothing is saved if `f` fails.
    ///
    /// Returns the updated plant and whatever `f` produced.
    fn update_plant<T, F>(&self, id: &str, now: DateTime<Utc>, f: F) -> Result<(Plant, T)>
    where
        F: FnOnce(&mut Plant) -> Result<T>,
    {
        let mut plants = self.plants(now)?;
        let plant = plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| VerdantError::plant_not_found(id))?;
        let output = f(plant)?;
        let updated = plant.clone();
        self.store.save_plants(&plants)?;
        Ok((updated, output))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.store.load_categories()
    }

    /// Display label for a plant's category.
    ///
    /// Categories that cannot be read show as "No Category".
    pub fn category_label(&self, plant: &Plant) -> String {
        let categories = self.categories().fail_open_default("loading category labels");
        label_for(&categories, plant.category_id.as_deref()).to_string()
    }

    /// Resolve a category by id, or failing that by label (case-insensitive).
    pub fn resolve_category(&self, reference: &str) -> Result<Category> {
        let categories = self.categories()?;
        let wanted = reference.trim();
        categories
            .iter()
            .find(|c| c.id == wanted)
            .or_else(|| {
                categories
                    .iter()
                    .find(|c| c.label.to_lowercase() == wanted.to_lowercase())
            })
            .cloned()
            .ok_or_else(|| VerdantError::category_not_found(wanted))
    }

    /// Create a category; it is appended after existing ones.
    pub fn create_category(&self, label: &str) -> Result<Category> {
        let created = category::create(label)?;
        let mut categories = self.store.load_categories()?;
        categories.push(created.clone());
        self.store.save_categories(&categories)?;
        tracing::info!(id = %created.id, label = %created.label, "created category");
        Ok(created)
    }

    pub fn rename_category(&self, id: &str, label: &str) -> Result<Category> {
        let mut categories = self.store.load_categories()?;
        let target = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| VerdantError::category_not_found(id))?;
        category::rename(target, label)?;
        let renamed = target.clone();
        self.store.save_categories(&categories)?;
        tracing::info!(id, label = %renamed.label, "renamed category");
        Ok(renamed)
    }

    /// Delete a category. Plants referencing it are left untouched.
    pub fn delete_category(&self, id: &str) -> Result<Category> {
        let mut categories = self.store.load_categories()?;
        let removed =
            category::delete(&mut categories, id).ok_or_else(|| VerdantError::category_not_found(id))?;
        self.store.save_categories(&categories)?;
        tracing::info!(id, label = %removed.label, "deleted category");
        Ok(removed)
    }

    // =========================================================================
    // Staged image
    // =========================================================================

    /// Stage an image for the next plant to be added.
    pub fn stage_image(&self, image: &str) -> Result<()> {
        if image.trim().is_empty() {
            return Err(VerdantError::validation("Please choose an image"));
        }
        self.store.stage_image(image)?;
        tracing::debug!(bytes = image.len(), "staged image");
        Ok(())
    }

    pub fn staged_image(&self) -> Option<String> {
        self.store.load_staged_image()
    }

    pub fn clear_staged_image(&self) -> Result<()> {
        self.store.clear_staged_image()
    }

    // =========================================================================
    // Overview
    // =========================================================================

    /// Filtered, sorted overview rows evaluated at `now`.
    pub fn overview(
        &self,
        filter: &CategoryFilter,
        sort: SortOrder,
        now: DateTime<Utc>,
    ) -> Result<Vec<PlantSummary>> {
        let plants = self.plants(now)?;
        let categories = self.categories()?;
        Ok(overview(&plants, &categories, filter, sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CREATION_JOURNAL_TEXT, NO_CATEGORY_LABEL};
    use crate::storage::{MemoryKeyValueStore, NOTES_KEY};
    use chrono::{Duration, TimeZone};
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 20, 10, 0, 0).unwrap()
    }

    fn garden() -> Garden<Arc<MemoryKeyValueStore>> {
        garden_with_kv().1
    }

    fn garden_with_kv() -> (Arc<MemoryKeyValueStore>, Garden<Arc<MemoryKeyValueStore>>) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let garden = Garden::new(Arc::clone(&kv)).with_day_boundary(DayBoundary::Utc);
        (kv, garden)
    }

    /// Memory store whose reads can be switched to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        fail_reads: AtomicBool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(VerdantError::storage(
                    format!("{key}.json"),
                    io::Error::other("disk unavailable"),
                ));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn draft(title: &str, water: u32, fertilizer: u32) -> PlantDraft {
        PlantDraft {
            title: title.to_string(),
            water_interval_days: water,
            fertilizer_interval_days: fertilizer,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_garden() {
        let garden = garden();
        assert!(garden.plants(now()).unwrap().is_empty());
        assert!(garden.categories().unwrap().is_empty());
    }

    #[test]
    fn test_add_plant_prepends_and_persists() {
        let garden = garden();
        let first = garden.add_plant(draft("Aloe", 7, 30), now()).unwrap();
        let second = garden.add_plant(draft("Basil", 1, 14), now()).unwrap();

        let plants = garden.plants(now()).unwrap();
        let ids: Vec<&str> = plants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert_eq!(plants[1].growth_journal[0].text, CREATION_JOURNAL_TEXT);
    }

    #[test]
    fn test_new_plant_needs_both_with_full_health() {
        let garden = garden();
        let plant = garden.add_plant(draft("Aloe", 7, 30), now()).unwrap();

        assert!(plant.needs_water);
        assert!(plant.needs_fertilizer);
        assert_eq!(plant.health_points, 100);
    }

    #[test]
    fn test_add_plant_validation_saves_nothing() {
        let (kv, garden) = garden_with_kv();

        let err = garden.add_plant(draft("  ", 7, 30), now()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a plant name");

        let err = garden.add_plant(draft("Aloe", 0, 30), now()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter watering frequency (days)");

        let err = garden.add_plant(draft("Aloe", 7, 0), now()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter fertilizer frequency (days)");

        assert!(kv.get(NOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_add_plant_uses_and_clears_staged_image() {
        let garden = garden();
        garden.stage_image("data:image/png;base64,AAAA").unwrap();

        let plant = garden.add_plant(draft("Aloe", 7, 30), now()).unwrap();

        assert_eq!(plant.image_ref.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(garden.staged_image().is_none());
    }

    #[test]
    fn test_explicit_image_wins_over_staged() {
        let garden = garden();
        garden.stage_image("data:staged").unwrap();

        let mut d = draft("Aloe", 7, 30);
        d.image_ref = Some("https://example.com/aloe.jpg".to_string());
        let plant = garden.add_plant(d, now()).unwrap();

        assert_eq!(plant.image_ref.as_deref(), Some("https://example.com/aloe.jpg"));
        assert!(garden.staged_image().is_some());
    }

    #[test]
    fn test_stage_blank_image_rejected() {
        let garden = garden();
        assert!(garden.stage_image(" ").is_err());
    }

    #[test]
    fn test_plant_not_found() {
        let garden = garden();
        let err = garden.plant("missing", now()).unwrap_err();
        assert!(matches!(err, VerdantError::NotFound { kind: "plant", .. }));
        assert!(garden.mark_watered("missing", now()).is_err());
        assert!(garden.delete_plant("missing").is_err());
    }

    #[test]
    fn test_overdue_plant_decays_on_read() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        garden.mark_watered(&plant.id, now()).unwrap();
        garden.mark_fertilized(&plant.id, now()).unwrap();

        let later = now() + Duration::days(5);
        let reloaded = garden.plant(&plant.id, later).unwrap();

        assert!(reloaded.needs_water);
        assert!(!reloaded.needs_fertilizer);
        assert_eq!(reloaded.health_points, 80);

        // Status was written back
        let stored = garden.store().load_plants().unwrap();
        assert_eq!(stored[0].health_points, 80);
    }

    #[test]
    fn test_mark_both_done_restores_health() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 3), now()).unwrap();
        garden.mark_watered(&plant.id, now()).unwrap();
        garden.mark_fertilized(&plant.id, now()).unwrap();

        let later = now() + Duration::days(6);
        assert_eq!(garden.plant(&plant.id, later).unwrap().health_points, 40);

        let watered = garden.mark_watered(&plant.id, later).unwrap();
        assert!(watered.needs_fertilizer);
        assert_eq!(watered.health_points, 40);

        let done = garden.mark_fertilized(&plant.id, later).unwrap();
        assert!(!done.needs_water);
        assert!(!done.needs_fertilizer);
        assert_eq!(done.health_points, 100);
    }

    #[test]
    fn test_read_without_change_does_not_write() {
        let (kv, garden) = garden_with_kv();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        garden.mark_watered(&plant.id, now()).unwrap();
        garden.mark_fertilized(&plant.id, now()).unwrap();

        let before = kv.get(NOTES_KEY).unwrap();
        garden.plants(now() + Duration::days(1)).unwrap();
        let after = kv.get(NOTES_KEY).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_edit_plant_updates_fields() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        let later = now() + Duration::hours(2);

        let edited = garden
            .edit_plant(
                &plant.id,
                PlantEdit {
                    title: Some("Boston Fern".to_string()),
                    personal_notes: Some("  mist weekly  ".to_string()),
                    ..Default::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(edited.title, "Boston Fern");
        assert_eq!(edited.personal_notes, "mist weekly");
        assert_eq!(edited.updated_at, later);
        assert_eq!(garden.plant(&plant.id, later).unwrap().title, "Boston Fern");
    }

    #[test]
    fn test_rejected_edit_saves_nothing() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();

        let err = garden
            .edit_plant(
                &plant.id,
                PlantEdit {
                    title: Some("Renamed".to_string()),
                    water_interval_days: Some(0),
                    ..Default::default()
                },
                now(),
            )
            .unwrap_err();

        assert!(matches!(err, VerdantError::Validation { .. }));
        assert_eq!(garden.plant(&plant.id, now()).unwrap().title, "Fern");
    }

    #[test]
    fn test_delete_plant() {
        let garden = garden();
        let keep = garden.add_plant(draft("Keep", 3, 30), now()).unwrap();
        let gone = garden.add_plant(draft("Gone", 3, 30), now()).unwrap();

        let removed = garden.delete_plant(&gone.id).unwrap();

        assert_eq!(removed.title, "Gone");
        let plants = garden.plants(now()).unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id, keep.id);
    }

    #[test]
    fn test_journal_add_and_remove() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        let later = now() + Duration::days(1);

        let entry = garden
            .add_journal_entry(&plant.id, "New frond unfurled", later)
            .unwrap();
        let stored = garden.plant(&plant.id, later).unwrap();
        assert_eq!(stored.growth_journal.len(), 2);
        assert_eq!(stored.updated_at, later);

        let removed = garden
            .remove_journal_entry(&plant.id, &entry.id, later)
            .unwrap()
            .unwrap();
        assert_eq!(removed.text, "New frond unfurled");
        assert_eq!(garden.plant(&plant.id, later).unwrap().growth_journal.len(), 1);
    }

    #[test]
    fn test_journal_errors() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();

        assert!(garden.add_journal_entry(&plant.id, "   ", now()).is_err());
        assert!(garden.add_journal_entry("missing", "hi", now()).is_err());
        assert!(garden
            .remove_journal_entry("missing", "any", now())
            .is_err());
    }

    #[test]
    fn test_remove_unknown_journal_entry_is_noop() {
        let garden = garden();
        let plant = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        let before = garden.store().load_plants().unwrap();
        let later = now() + Duration::days(1);

        let removed = garden
            .remove_journal_entry(&plant.id, "absent-id", later)
            .unwrap();

        assert!(removed.is_none());
        let after = garden.store().load_plants().unwrap();
        assert_eq!(after, before);
        assert_eq!(after[0].updated_at, plant.updated_at);
    }

    #[test]
    fn test_failed_read_aborts_without_overwriting() {
        let kv = Arc::new(FlakyStore::default());
        let garden = Garden::new(Arc::clone(&kv)).with_day_boundary(DayBoundary::Utc);
        let fern = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();
        let herbs = garden.create_category("Herbs").unwrap();

        kv.fail_reads.store(true, Ordering::SeqCst);
        let err = garden.add_plant(draft("Aloe", 7, 30), now()).unwrap_err();
        assert!(matches!(err, VerdantError::Storage { .. }));
        assert!(garden.delete_plant(&fern.id).is_err());
        assert!(garden.create_category("Cacti").is_err());
        assert!(garden.overview(&CategoryFilter::All, SortOrder::Updated, now()).is_err());
        kv.fail_reads.store(false, Ordering::SeqCst);

        let plants = garden.plants(now()).unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id, fern.id);
        assert_eq!(garden.categories().unwrap(), vec![herbs]);
    }

    #[test]
    fn test_category_lifecycle() {
        let garden = garden();
        let herbs = garden.create_category("Herbs").unwrap();
        let cacti = garden.create_category("Cacti").unwrap();

        let labels: Vec<String> = garden.categories().unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Herbs", "Cacti"]);

        let renamed = garden.rename_category(&herbs.id, "Kitchen herbs").unwrap();
        assert_eq!(renamed.label, "Kitchen herbs");

        garden.delete_category(&cacti.id).unwrap();
        assert_eq!(garden.categories().unwrap().len(), 1);

        assert!(garden.create_category("").is_err());
        assert!(garden.rename_category(&herbs.id, " ").is_err());
        assert!(garden.rename_category("missing", "x").is_err());
        assert!(garden.delete_category("missing").is_err());
    }

    #[test]
    fn test_resolve_category_by_id_or_label() {
        let garden = garden();
        let herbs = garden.create_category("Herbs").unwrap();

        assert_eq!(garden.resolve_category(&herbs.id).unwrap(), herbs);
        assert_eq!(garden.resolve_category("herbs").unwrap(), herbs);
        assert!(garden.resolve_category("Cacti").is_err());
    }

    #[test]
    fn test_category_label() {
        let garden = garden();
        let herbs = garden.create_category("Herbs").unwrap();
        let mut d = draft("Basil", 1, 14);
        d.category_id = Some(herbs.id.clone());
        let basil = garden.add_plant(d, now()).unwrap();
        let fern = garden.add_plant(draft("Fern", 3, 30), now()).unwrap();

        assert_eq!(garden.category_label(&basil), "Herbs");
        assert_eq!(garden.category_label(&fern), NO_CATEGORY_LABEL);
    }

    #[test]
    fn test_deleted_category_shows_no_category() {
        let garden = garden();
        let herbs = garden.create_category("Herbs").unwrap();
        let mut d = draft("Basil", 1, 14);
        d.category_id = Some(herbs.id.clone());
        let plant = garden.add_plant(d, now()).unwrap();

        garden.delete_category(&herbs.id).unwrap();

        let rows = garden
            .overview(&CategoryFilter::All, SortOrder::Updated, now())
            .unwrap();
        assert_eq!(rows[0].category, NO_CATEGORY_LABEL);
        let stored = garden.plant(&plant.id, now()).unwrap();
        assert_eq!(stored.category_id.as_deref(), Some(herbs.id.as_str()));
    }

    #[test]
    fn test_overview_filter_and_sort() {
        let garden = garden();
        let herbs = garden.create_category("Herbs").unwrap();
        let mut basil = draft("basil", 1, 14);
        basil.category_id = Some(herbs.id.clone());
        garden.add_plant(basil, now()).unwrap();
        garden.add_plant(draft("Aloe", 7, 30), now()).unwrap();

        let only_herbs = garden
            .overview(&CategoryFilter::Only(herbs.id.clone()), SortOrder::Title, now())
            .unwrap();
        assert_eq!(only_herbs.len(), 1);
        assert_eq!(only_herbs[0].category, "Herbs");

        let by_title = garden
            .overview(&CategoryFilter::All, SortOrder::Title, now())
            .unwrap();
        let titles: Vec<&str> = by_title.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Aloe", "basil"]);
    }
}
