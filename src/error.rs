//! Unified error types for Verdant.
//!
//! Two kinds of failure reach the user: rejected actions (validation, missing
//! records) and infrastructure faults (storage, serialization, config).
//! Reading persisted data follows a fail-open rule: corrupted or missing data
//! degrades to an empty collection with a warning instead of an error. A
//! failed read is still an error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Verdant operations.
#[derive(Error, Debug)]
pub enum VerdantError {
    /// I/O errors from the on-disk key-value store.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// A user action was rejected (empty required field, bad interval).
    #[error("{message}")]
    Validation { message: String },

    /// The action targeted a record that is no longer in the collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for Verdant operations.
pub type Result<T> = std::result::Result<T, VerdantError>;

impl VerdantError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for a plant.
    pub fn plant_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "plant",
            id: id.into(),
        }
    }

    /// Create a not-found error for a category.
    pub fn category_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "category",
            id: id.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<io::Error> for VerdantError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for VerdantError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Logs the error and returns a safe default. Used where the system must
/// keep running, e.g. on first run or after storage was cleared by hand.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the Verdant CLI.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command was rejected or failed.
    pub const ERROR: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
