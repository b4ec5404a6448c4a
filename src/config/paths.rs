//! Path management for ClearSpend
//!
//! Provides XDG-compliant path resolution for configuration and ledger data.
//!
//! ## Path Resolution Order
//!
//! 1. `CLEARSPEND_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/clearspend` or `~/.config/clearspend`
//! 3. Windows: `%APPDATA%\clearspend`

use std::path::PathBuf;

use crate::error::ClearSpendError;

/// Manages all paths used by ClearSpend
#[derive(Debug, Clone)]
pub struct ClearSpendPaths {
    base_dir: PathBuf,
}

impl ClearSpendPaths {
    /// Create a new ClearSpendPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ClearSpendError> {
        let base_dir = if let Ok(custom) = std::env::var("CLEARSPEND_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ClearSpendPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/clearspend/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/clearspend/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn sub_categories_file(&self) -> PathBuf {
        self.data_dir().join("sub_categories.json")
    }

    pub fn ledgers_file(&self) -> PathBuf {
        self.data_dir().join("ledgers.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ClearSpendError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ClearSpendError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            ClearSpendError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if ClearSpend has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ClearSpendError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                ClearSpendError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("clearspend"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ClearSpendError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ClearSpendError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("clearspend"))
}
