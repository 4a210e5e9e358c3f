//! CLI commands for Verdant.
//!
//! This module provides CLI commands for Verdant, organized into:
//! - **Plant commands**: add, edit, show, list, delete
//! - **Care commands**: water, fertilize
//! - **Collection commands**: journal, category, image

pub mod confirm;
pub mod output;

// Plant commands
pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

// Care commands
pub mod care;

// Collection commands
pub mod category;
pub mod image;
pub mod journal;

pub use add::{AddCommand, AddInput};
pub use care::CareCommand;
pub use category::{CategoryAction, CategoryCommand};
pub use confirm::confirm;
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditInput};
pub use image::{ImageAction, ImageCommand};
pub use journal::{JournalAction, JournalCommand};
pub use list::{ListCommand, ListOptions};
pub use output::{DateStyle, OutputOptions, PlantOutput};
pub use show::ShowCommand;
