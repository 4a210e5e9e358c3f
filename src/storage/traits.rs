//! Key-value storage traits for Verdant.
//!
//! This module defines the `KeyValueStore` trait: a small string-keyed,
//! string-valued store with whole-value replace semantics, the same shape as
//! browser local storage.

use std::sync::Arc;

use crate::error::Result;

/// Trait for key-value storage backends.
///
/// Values are opaque serialized strings; typed access lives in
/// [`crate::storage::EntityStore`]. Every call is synchronous and replaces
/// the whole value. There is no locking across processes.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.
    ///
    /// Returns `Ok(())` even if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key is present.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Blanket implementation of KeyValueStore for Arc-wrapped stores.
///
/// This allows using `Arc<T>` where `T: KeyValueStore` is expected,
/// which is useful for sharing stores between tests and commands.
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
