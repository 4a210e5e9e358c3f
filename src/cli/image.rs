//! Image command for Verdant.
//!
//! Stages an image reference (URL, path or data URL) for the next plant to
//! be added, or clears it.

use serde::Serialize;

use crate::cli::output::{abbreviate, OutputOptions};
use crate::config::Config;
use crate::error::Result;
use crate::service::Garden;
use crate::storage::KeyValueStore;

/// Image action to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAction {
    Stage(String),
    Clear,
    Show,
}

impl ImageAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Stage(_) => "stage",
            Self::Clear => "clear",
            Self::Show => "show",
        }
    }
}

/// Output format for the image command.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Action performed.
    pub action: String,
    /// Image staged after the command ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staged: Option<String>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageOutput {
    /// Create a successful output.
    pub fn success(action: impl Into<String>, staged: Option<String>) -> Self {
        Self {
            success: true,
            action: action.into(),
            staged,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            action: action.into(),
            staged: None,
            error: Some(error.into()),
        }
    }
}

/// The image command implementation.
pub struct ImageCommand<K: KeyValueStore> {
    garden: Garden<K>,
}

impl<K: KeyValueStore> ImageCommand<K> {
    /// Create a new image command.
    pub fn new(store: K, config: Config) -> Self {
        Self {
            garden: Garden::with_config(store, &config),
        }
    }

    /// Run the image command.
    pub fn run(&self, action: &ImageAction) -> ImageOutput {
        match self.execute(action) {
            Ok(()) => ImageOutput::success(action.name(), self.garden.staged_image()),
            Err(e) => ImageOutput::failure(action.name(), e.to_string()),
        }
    }

    fn execute(&self, action: &ImageAction) -> Result<()> {
        match action {
            ImageAction::Stage(image) => self.garden.stage_image(image),
            ImageAction::Clear => self.garden.clear_staged_image(),
            ImageAction::Show => Ok(()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ImageOutput, options: &OutputOptions) -> String {
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
    fn format_human_readable(&self, output: &ImageOutput) -> String {
        if !output.success {
            return format!(
                "Error: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        match (output.action.as_str(), &output.staged) {
            ("stage", Some(image)) => format!(
                "Image staged for the next new plant: {}\n",
                abbreviate(image, 60)
            ),
            ("clear", _) => "Staged image cleared.\n".to_string(),
            (_, Some(image)) => format!("Staged image: {}\n", abbreviate(image, 60)),
            (_, None) => "No image staged.\n".to_string(),
        }
    }
}
