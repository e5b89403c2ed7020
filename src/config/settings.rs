//! User settings for the account book
//!
//! Stored as `.config.json` inside the data directory. Every field has a
//! default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::AccountsPaths;
use crate::error::AccountError;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency symbol used when printing balances
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether console messages are coloured
    #[serde(default = "default_true")]
    pub color: bool,

    /// Whether successful mutations are appended to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            color: true,
            audit_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &AccountsPaths) -> Result<Self, AccountError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AccountError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AccountError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AccountsPaths) -> Result<(), AccountError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AccountError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            AccountError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
