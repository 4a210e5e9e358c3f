//! File-based key-value storage for Verdant.
//!
//! Each key is stored as `<data_dir>/<key>.json`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, VerdantError};
use crate::storage::KeyValueStore;

/// File-based key-value store.
///
/// Uses atomic writes via temp file + rename. Concurrent writers from two
/// processes are not coordinated: the last rename wins.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    data_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store in the data directory named by the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dir = config.data_dir().ok_or_else(|| {
            VerdantError::config("Could not determine data directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a store rooted at a custom directory.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| VerdantError::storage(&data_dir, e))?;
        }

        Ok(Self { data_dir })
    }

    /// Directory holding the key files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Keys become file names, so only a conservative character set is allowed.
    fn validate_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(VerdantError::config(format!("invalid storage key '{key}'")));
        }
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", key))
    }

    fn atomic_write(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.key_path(key);
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| VerdantError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| VerdantError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| VerdantError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| VerdantError::storage(&final_path, e))?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        let path = self.key_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(key, bytes = content.len(), "read key");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VerdantError::storage(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.atomic_write(key, value)?;
        tracing::debug!(key, bytes = value.len(), "wrote key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;
        let path = self.key_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| VerdantError::storage(&path, e))?;
        }

        // Also clean up any temp file left by an interrupted write
        let temp_path = self.temp_path(key);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}
