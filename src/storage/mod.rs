//! Persistent storage for Verdant.
//!
//! A string key-value layer with file-based and in-memory backends, and a
//! typed entity store on top that reads and writes whole collections.

pub mod entity;
pub mod file;
pub mod memory;
pub mod traits;

pub use entity::{EntityStore, CATEGORIES_KEY, NOTES_KEY, STAGED_IMAGE_KEY};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
