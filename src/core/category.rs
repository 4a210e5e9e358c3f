//! Plant categories ("plant families").
//!
//! Plants reference categories by id without referential integrity.
//! Deleting a category never touches plants; unresolved ids display as
//! [`NO_CATEGORY_LABEL`].

use serde::{Deserialize, Serialize};

use crate::core::plant::generate_id;
use crate::error::{Result, VerdantError};

/// Display label for plants without a resolvable category.
pub const NO_CATEGORY_LABEL: &str = "No Category";

/// A label that groups plants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
}

fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(VerdantError::validation("Please fill in the label"));
    }
    Ok(())
}

/// Create a category with a fresh id.
pub fn create(label: &str) -> Result<Category> {
    validate_label(label)?;
    Ok(Category {
        id: generate_id(),
        label: label.trim().to_string(),
    })
}

/// Rename a category. Labels need not be unique.
pub fn rename(category: &mut Category, new_label: &str) -> Result<()> {
    validate_label(new_label)?;
    category.label = new_label.trim().to_string();
    Ok(())
}

/// Remove the category with `id` from the list, returning it if present.
pub fn delete(categories: &mut Vec<Category>, id: &str) -> Option<Category> {
    let index = categories.iter().position(|c| c.id == id)?;
    Some(categories.remove(index))
}

/// Resolve a plant's category reference to a display label.
pub fn label_for<'a>(categories: &'a [Category], category_id: Option<&str>) -> &'a str {
    category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.label.as_str())
        .unwrap_or(NO_CATEGORY_LABEL)
}
