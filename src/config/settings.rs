//! User settings for ClearSpend
//!
//! Manages user preferences: display currency, payment methods for manual
//! and scanned entries, and the default export file.

use serde::{Deserialize, Serialize};

use super::paths::ClearSpendPaths;
use crate::error::ClearSpendError;
use crate::storage::write_json_atomic;

/// User settings for ClearSpend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Payment method used for manual entry when none is given
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,

    /// Payment method recorded for expenses created from a scanned receipt
    #[serde(default = "default_scan_payment_method")]
    pub scan_payment_method: String,

    /// File written by `export` when no output is given
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Whether the default category tree has been seeded
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_payment_method() -> String {
    "Cash".to_string()
}

fn default_scan_payment_method() -> String {
    "Cash".to_string()
}

fn default_export_file_name() -> String {
    "clearspend_expenses.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_payment_method: default_payment_method(),
            scan_payment_method: default_scan_payment_method(),
            export_file_name: default_export_file_name(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &ClearSpendPaths) -> Result<Self, ClearSpendError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ClearSpendError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ClearSpendError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ClearSpendPaths) -> Result<(), ClearSpendError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
