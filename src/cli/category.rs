//! Category command for Verdant.
//!
//! Manages plant categories. Deleting a category leaves plants that
//! reference it untouched; they show as "No Category".

use serde::Serialize;

use crate::cli::output::OutputOptions;
use crate::config::Config;
use crate::core::Category;
use crate::error::Result;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Category action to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryAction {
    Add { label: String },
    /// Rename the category matching `reference` (id or label).
    Rename { reference: String, label: String },
    /// Delete the category matching `reference` (id or label).
    Delete { reference: String },
    List,
}

impl CategoryAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Rename { .. } => "rename",
            Self::Delete { .. } => "delete",
            Self::List => "list",
        }
    }
}

/// Output format for the category command.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Action performed.
    pub action: String,
    /// Affected category, or every category for `list`.
    pub categories: Vec<Category>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategoryOutput {
    /// Create a successful output.
    pub fn success(action: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            success: true,
            action: action.into(),
            categories,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            action: action.into(),
            categories: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The category command implementation.
pub struct CategoryCommand<K: KeyValueStore> {
    garden: Garden<K>,
}

impl<K: KeyValueStore> CategoryCommand<K> {
    /// Create a new category command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
        }
    }

    /// Run the category command.
    pub fn run(&self, action: &CategoryAction) -> CategoryOutput {
        match self.execute(action) {
            Ok(categories) => CategoryOutput::success(action.name(), categories),
            Err(e) => CategoryOutput::failure(action.name(), e.to_string()),
        }
    }

    fn execute(&self, action: &CategoryAction) -> Result<Vec<Category>> {
        match action {
            CategoryAction::Add { label } => Ok(vec![self.garden.create_category(label)?]),
            CategoryAction::Rename { reference, label } => {
                let target = self.garden.resolve_category(reference)?;
                Ok(vec![self.garden.rename_category(&target.id, label)?])
            }
            CategoryAction::Delete { reference } => {
                let target = self.garden.resolve_category(reference)?;
                Ok(vec![self.garden.delete_category(&target.id)?])
            }
            CategoryAction::List => self.garden.categories(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CategoryOutput, options: &OutputOptions) -> String {
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
    fn format_human_readable(&self, output: &CategoryOutput) -> String {
        if !output.success {
            return format!(
                "Error: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let verb = match output.action.as_str() {
            "add" => "added",
            "rename" => "updated",
            "delete" => "deleted",
            _ => {
                if output.categories.is_empty() {
                    return "No categories.\n".to_string();
                }
                let mut text = format!("Categories ({}):\n", output.categories.len());
                for category in &output.categories {
                    text.push_str(&format!("  {:<24} {}\n", category.label, category.id));
                }
                return text;
            }
        };

        output
            .categories
            .iter()
            .map(|c| format!("Category '{}' has been {} ({}).\n", c.label, verb, c.id))
            .collect()
    }
}
