//! Path management for the account book
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` on the command line (handled by the binary)
//! 2. `ACCOUNTS_DATA_DIR` environment variable (if set)
//! 3. `./accounts` relative to the working directory

use std::path::PathBuf;

use crate::error::AccountError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ACCOUNTS_DATA_DIR";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "accounts";

/// Manages all paths used by the account book
#[derive(Debug, Clone)]
pub struct AccountsPaths {
    /// Directory holding one `<name>.json` record per account
    data_dir: PathBuf,
}

impl AccountsPaths {
    /// Create a new AccountsPaths instance from the environment
    pub fn new() -> Self {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => PathBuf::from(DEFAULT_DATA_DIR),
        };

        Self { data_dir }
    }

    /// Create AccountsPaths with an explicit data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Get the path to the settings file
    ///
    /// Dot-prefixed so it can never collide with an account record.
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(".config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.data_dir.join(".audit.log")
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<(), AccountError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| AccountError::Io(format!("Failed to create data directory: {}", e)))
    }
}

impl Default for AccountsPaths {
    fn default() -> Self {
        Self::new()
    }
}
