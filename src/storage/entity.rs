//! Typed access to the plant, category and staged-image collections.
//!
//! Each collection lives under one key and is always read and written whole.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{Category, Plant};
use crate::error::{FailOpen, Result, VerdantError};
use crate::storage::KeyValueStore;

/// Key holding the plant collection.
pub const NOTES_KEY: &str = "notes";

/// Key holding the category collection.
pub const CATEGORIES_KEY: &str = "categories";

/// Key holding the image staged for the next new plant.
pub const STAGED_IMAGE_KEY: &str = "uploadedPlantSelfie";

/// Typed view over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct EntityStore<K> {
    kv: K,
}

impl<K: KeyValueStore> EntityStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load all plants.
    ///
    /// Missing or corrupt data yields an empty list. A failed read is an
    /// error, so a later save cannot overwrite data that was never seen.
    pub fn load_plants(&self) -> Result<Vec<Plant>> {
        self.load_collection(NOTES_KEY, "loading plants")
    }

    /// Replace the stored plant collection.
    pub fn save_plants(&self, plants: &[Plant]) -> Result<()> {
        self.save_collection(NOTES_KEY, plants)?;
        tracing::debug!(count = plants.len(), "saved plants");
        Ok(())
    }

    /// Load all categories. Same rules as [`load_plants`](Self::load_plants).
    pub fn load_categories(&self) -> Result<Vec<Category>> {
        self.load_collection(CATEGORIES_KEY, "loading categories")
    }

    /// Replace the stored category collection.
    pub fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.save_collection(CATEGORIES_KEY, categories)?;
        tracing::debug!(count = categories.len(), "saved categories");
        Ok(())
    }

    /// The staged image, if any.
    ///
    /// Values written as plain text rather than a JSON string are accepted
    /// as is.
    pub fn load_staged_image(&self) -> Option<String> {
        let raw = self
            .kv
            .get(STAGED_IMAGE_KEY)
            .fail_open_default("loading staged image")?;
        let image = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        if image.trim().is_empty() {
            None
        } else {
            Some(image)
        }
    }

    /// Stage an image for the next plant to be added.
    pub fn stage_image(&self, image: &str) -> Result<()> {
        let encoded = serde_json::to_string(image)?;
        self.kv.set(STAGED_IMAGE_KEY, &encoded)
    }

    pub fn clear_staged_image(&self) -> Result<()> {
        self.kv.remove(STAGED_IMAGE_KEY)
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str, context: &str) -> Result<Vec<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(Vec::new());
        }
        let parsed = serde_json::from_str(&raw)
            .map_err(|e| VerdantError::serde(format!("corrupt data under '{}': {}", key, e)));
        Ok(parsed.fail_open_default(context))
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(items)?;
        self.kv.set(key, &encoded)
    }
}
