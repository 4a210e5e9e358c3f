//! Configuration loading for Verdant.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.verdant/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};

use crate::core::{DayBoundary, SortOrder, VALID_DAY_BOUNDARIES, VALID_SORTS};
use crate::error::{FailOpen, Result, VerdantError};

/// Name of the config file inside the Verdant home directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration struct for Verdant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where plant data is kept.
    pub storage: StorageConfig,
    /// Care engine settings.
    pub care: CareConfig,
    /// Output settings for the CLI.
    pub display: DisplayConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Defaults to `<verdant home>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Care engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CareConfig {
    /// Calendar used to split time into days: "local" or "utc".
    pub day_boundary: String,
}

impl CareConfig {
    /// Check if a day boundary value is valid.
    pub fn is_valid_day_boundary(value: &str) -> bool {
        VALID_DAY_BOUNDARIES.contains(&value)
    }
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            day_boundary: "local".to_string(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Sort order for `list` when none is given: "updated", "title" or "urgency".
    pub default_sort: String,
    /// strftime format for dates in human-readable output.
    pub date_format: String,
}

impl DisplayConfig {
    /// Check if a sort value is valid.
    pub fn is_valid_sort(value: &str) -> bool {
        VALID_SORTS.contains(&value)
    }

    /// Check if a date format is a usable strftime string.
    pub fn is_valid_date_format(value: &str) -> bool {
        !value.is_empty() && !StrftimeItems::new(value).any(|item| matches!(item, Item::Error))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: "updated".to_string(),
            date_format: "%d/%m/%y".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. User config (`<verdant home>/config.toml`)
    /// 3. Defaults
    pub fn load() -> Self {
        match verdant_home() {
            Some(home) => Self::load_from_home(&home),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration using a specific Verdant home directory.
    pub fn load_from_home(home: &Path) -> Self {
        // Start with defaults
        let mut config = Config::default();

        // Layer 3 → 2: Apply user config
        if let Some(user_config) = Self::load_user_config(home) {
            config = config.merge(user_config);
        }

        // Layer 2 → 1: Apply environment variables
        config.apply_env_overrides();

        config
    }

    /// Load user config from `<home>/config.toml`.
    ///
    /// A missing file is silent; an unreadable or malformed one is warned
    /// about and skipped.
    fn load_user_config(home: &Path) -> Option<Config> {
        let config_path = home.join(CONFIG_FILE);
        if !config_path.exists() {
            return None;
        }
        Self::load_from_file(&config_path)
            .map(Some)
            .fail_open_with("loading user config", None)
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| VerdantError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| VerdantError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // VERDANT_DATA_DIR
        if let Ok(val) = env::var("VERDANT_DATA_DIR") {
            if val.trim().is_empty() {
                eprintln!("Warning: VERDANT_DATA_DIR is empty. Using default data directory.");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }

        // VERDANT_DAY_BOUNDARY
        if let Ok(val) = env::var("VERDANT_DAY_BOUNDARY") {
            if CareConfig::is_valid_day_boundary(&val) {
                self.care.day_boundary = val;
            } else {
                eprintln!(
                    "Warning: Invalid VERDANT_DAY_BOUNDARY value '{}'. \
                    Valid values: {:?}. Using default '{}'.",
                    val, VALID_DAY_BOUNDARIES, self.care.day_boundary
                );
            }
        }

        // VERDANT_DEFAULT_SORT
        if let Ok(val) = env::var("VERDANT_DEFAULT_SORT") {
            if DisplayConfig::is_valid_sort(&val) {
                self.display.default_sort = val;
            } else {
                eprintln!(
                    "Warning: Invalid VERDANT_DEFAULT_SORT value '{}'. \
                    Valid values: {:?}. Using default '{}'.",
                    val, VALID_SORTS, self.display.default_sort
                );
            }
        }

        // VERDANT_DATE_FORMAT
        if let Ok(val) = env::var("VERDANT_DATE_FORMAT") {
            if DisplayConfig::is_valid_date_format(&val) {
                self.display.date_format = val;
            } else {
                eprintln!(
                    "Warning: Invalid VERDANT_DATE_FORMAT value '{}'. \
                    Expected a strftime format. Using default '{}'.",
                    val, self.display.date_format
                );
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence. Non-default fields from `other`
    /// are applied field by field, so a layer only needs to list its
    /// customizations. A layer cannot set a value back to the default over a
    /// lower layer's customization.
    fn merge(mut self, other: Config) -> Self {
        // Storage
        if other.storage.data_dir.is_some() {
            self.storage.data_dir = other.storage.data_dir;
        }

        // Care
        let default_care = CareConfig::default();
        if other.care.day_boundary != default_care.day_boundary {
            self.care.day_boundary = other.care.day_boundary;
        }

        // Display: merge field by field
        let default_display = DisplayConfig::default();
        if other.display.default_sort != default_display.default_sort {
            self.display.default_sort = other.display.default_sort;
        }
        if other.display.date_format != default_display.date_format {
            self.display.date_format = other.display.date_format;
        }

        self
    }

    /// Directory holding the key-value data files.
    pub fn data_dir(&self) -> Option<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Some(dir.clone()),
            None => verdant_home().map(|home| home.join("data")),
        }
    }

    /// The configured day boundary, falling back to local days.
    pub fn day_boundary(&self) -> DayBoundary {
        self.care
            .day_boundary
            .parse::<DayBoundary>()
            .fail_open_default("parsing care.day_boundary")
    }

    /// The configured default sort, falling back to most recently updated.
    pub fn default_sort(&self) -> SortOrder {
        self.display
            .default_sort
            .parse::<SortOrder>()
            .fail_open_default("parsing display.default_sort")
    }

    /// The configured date format, falling back to the default when invalid.
    pub fn date_format(&self) -> &str {
        if DisplayConfig::is_valid_date_format(&self.display.date_format) {
            &self.display.date_format
        } else {
            tracing::warn!(
                format = %self.display.date_format,
                "invalid display.date_format, using default"
            );
            "%d/%m/%y"
        }
    }
}

/// Get the Verdant home directory.
///
/// Uses `VERDANT_HOME` when set, otherwise `~/.verdant`. Without a home
/// directory, falls back to a per-user location under `/tmp`.
pub fn verdant_home() -> Option<PathBuf> {
    // Check VERDANT_HOME env var first
    if let Ok(home) = env::var("VERDANT_HOME") {
        if home.is_empty() {
            tracing::warn!("VERDANT_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("VERDANT_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    // Fall back to ~/.verdant
    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".verdant"));
    }

    // Fallback for containerized/minimal environments without HOME
    let fallback_path = fallback_verdant_home();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get fallback Verdant home path when HOME is unavailable.
#[cfg(unix)]
fn fallback_verdant_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    // Get UID for unique temp directory
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/verdant-{}", uid))
}

/// Get fallback Verdant home path when HOME is unavailable.
#[cfg(not(unix))]
fn fallback_verdant_home() -> PathBuf {
    std::env::temp_dir().join("verdant")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "VERDANT_DATA_DIR",
        "VERDANT_DAY_BOUNDARY",
        "VERDANT_DEFAULT_SORT",
        "VERDANT_DATE_FORMAT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.care.day_boundary, "local");
        assert_eq!(config.display.default_sort, "updated");
        assert_eq!(config.display.date_format, "%d/%m/%y");
        assert_eq!(config.day_boundary(), DayBoundary::Local);
        assert_eq!(config.default_sort(), SortOrder::Updated);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [display]
            default_sort = "urgency"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.default_sort, "urgency");
        assert_eq!(config.display.date_format, "%d/%m/%y");
        assert_eq!(config.care.day_boundary, "local");
    }

    #[test]
    fn test_full_toml_roundtrip() {
        let config = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/srv/plants")),
            },
            care: CareConfig {
                day_boundary: "utc".to_string(),
            },
            display: DisplayConfig {
                default_sort: "title".to_string(),
                date_format: "%Y-%m-%d".to_string(),
            },
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    #[serial]
    fn test_load_from_home_reads_user_config() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[care]\nday_boundary = \"utc\"\n",
        )
        .unwrap();

        let config = Config::load_from_home(dir.path());

        assert_eq!(config.day_boundary(), DayBoundary::Utc);
        assert_eq!(config.display.default_sort, "updated");
    }

    #[test]
    #[serial]
    fn test_load_from_home_never_writes() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let config = Config::load_from_home(dir.path());

        assert_eq!(config, Config::default());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    #[serial]
    fn test_malformed_user_config_uses_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[care\nnot toml").unwrap();

        let config = Config::load_from_home(dir.path());

        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides_user_config() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[display]\ndefault_sort = \"title\"\n",
        )
        .unwrap();
        env::set_var("VERDANT_DEFAULT_SORT", "urgency");

        let config = Config::load_from_home(dir.path());

        assert_eq!(config.default_sort(), SortOrder::Urgency);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_data_dir_applied() {
        clear_env();
        env::set_var("VERDANT_DATA_DIR", "/var/lib/verdant");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.data_dir(), Some(PathBuf::from("/var/lib/verdant")));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_invalid_day_boundary_ignored() {
        clear_env();
        env::set_var("VERDANT_DAY_BOUNDARY", "lunar");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.care.day_boundary, "local");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_valid_day_boundary_applied() {
        for valid in VALID_DAY_BOUNDARIES {
            clear_env();
            env::set_var("VERDANT_DAY_BOUNDARY", valid);

            let mut config = Config::default();
            config.apply_env_overrides();

            assert_eq!(config.care.day_boundary, *valid);
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_invalid_sort_ignored() {
        clear_env();
        env::set_var("VERDANT_DEFAULT_SORT", "random");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.display.default_sort, "updated");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_date_format() {
        clear_env();
        env::set_var("VERDANT_DATE_FORMAT", "%Y-%m-%d");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.display.date_format, "%Y-%m-%d");

        env::set_var("VERDANT_DATE_FORMAT", "%Q");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.display.date_format, "%d/%m/%y");

        clear_env();
    }

    #[test]
    fn test_is_valid_sort() {
        assert!(DisplayConfig::is_valid_sort("updated"));
        assert!(DisplayConfig::is_valid_sort("title"));
        assert!(DisplayConfig::is_valid_sort("urgency"));
        assert!(!DisplayConfig::is_valid_sort("Updated"));
        assert!(!DisplayConfig::is_valid_sort(""));
    }

    #[test]
    fn test_is_valid_date_format() {
        assert!(DisplayConfig::is_valid_date_format("%d/%m/%y"));
        assert!(DisplayConfig::is_valid_date_format("%Y-%m-%d %H:%M"));
        assert!(!DisplayConfig::is_valid_date_format("%Q"));
        assert!(!DisplayConfig::is_valid_date_format(""));
    }

    #[test]
    fn test_invalid_values_from_file_fall_back() {
        let config = Config {
            care: CareConfig {
                day_boundary: "lunar".to_string(),
            },
            display: DisplayConfig {
                default_sort: "random".to_string(),
                date_format: "%Q".to_string(),
            },
            ..Config::default()
        };

        assert_eq!(config.day_boundary(), DayBoundary::Local);
        assert_eq!(config.default_sort(), SortOrder::Updated);
        assert_eq!(config.date_format(), "%d/%m/%y");
    }

    #[test]
    fn test_merge_field_by_field_preserves_non_default_values() {
        let base = Config {
            care: CareConfig {
                day_boundary: "utc".to_string(),
            },
            ..Config::default()
        };
        let overlay = Config {
            display: DisplayConfig {
                default_sort: "title".to_string(),
                ..DisplayConfig::default()
            },
            ..Config::default()
        };

        let merged = base.merge(overlay);

        assert_eq!(merged.care.day_boundary, "utc");
        assert_eq!(merged.display.default_sort, "title");
        assert_eq!(merged.display.date_format, "%d/%m/%y");
    }

    #[test]
    fn test_merge_data_dir() {
        let base = Config::default();
        let overlay = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/data")),
            },
            ..Config::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.storage.data_dir, Some(PathBuf::from("/data")));
    }

    #[test]
    #[serial]
    fn test_verdant_home_with_env() {
        let dir = TempDir::new().unwrap();
        env::set_var("VERDANT_HOME", dir.path().to_str().unwrap());

        let home = verdant_home().unwrap();
        assert_eq!(home, dir.path());

        env::remove_var("VERDANT_HOME");
    }

    #[test]
    #[serial]
    fn test_verdant_home_fallback() {
        env::remove_var("VERDANT_HOME");

        let home = verdant_home();
        assert!(home.is_some());
        assert!(home.unwrap().ends_with(".verdant"));
    }

    #[test]
    #[serial]
    fn test_verdant_home_empty_env() {
        env::set_var("VERDANT_HOME", "");

        let home = verdant_home();
        assert!(home.is_some());
        assert!(home.unwrap().ends_with(".verdant"));

        env::remove_var("VERDANT_HOME");
    }

    #[test]
    #[serial]
    fn test_default_data_dir_under_home() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("VERDANT_HOME", dir.path().to_str().unwrap());

        let config = Config::default();
        assert_eq!(config.data_dir(), Some(dir.path().join("data")));

        env::remove_var("VERDANT_HOME");
    }
}
