//! Account repository for JSON storage
//!
//! One `<name>.json` file per account inside the data directory. Every
//! write replaces the whole record.

use std::fs;
use std::path::PathBuf;

use crate::error::AccountError;
use crate::models::{AccountName, AccountRecord};

use super::file_io::{read_json, write_json_atomic};

/// Repository for account persistence
pub struct AccountRepository {
    dir: PathBuf,
}

impl AccountRepository {
    /// Create a new account repository rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Location of the record for `name`
    pub fn path_for(&self, name: &AccountName) -> PathBuf {
        self.dir.join(name.file_name())
    }

    /// Whether anything occupies this account's record path
    pub fn exists(&self, name: &AccountName) -> bool {
        self.path_for(name).exists()
    }

    /// Load an account record, or `None` if there is no record
    ///
    /// A record with a negative balance was not written by this program and
    /// is reported as a storage error.
    pub fn load(&self, name: &AccountName) -> Result<Option<AccountRecord>, AccountError> {
        let path = self.path_for(name);
        let record: Option<AccountRecord> = read_json(&path)?;

        match record {
            Some(record) if record.balance.is_negative() => Err(AccountError::Storage(format!(
                "negative balance {} in {}",
                record.balance,
                path.display()
            ))),
            record => Ok(record),
        }
    }

    /// Overwrite the record for an account
    pub fn save(&self, name: &AccountName, record: &AccountRecord) -> Result<(), AccountError> {
        write_json_atomic(&self.path_for(name), record)
    }

    /// Persist a brand new record, failing if one is already there
    pub fn insert_new(
        &self,
        name: &AccountName,
        record: &AccountRecord,
    ) -> Result<(), AccountError> {
        if self.exists(name) {
            return Err(AccountError::AlreadyExists(name.to_string()));
        }

        self.save(name, record)
    }

    /// Names of all account records on disk, sorted
    ///
    /// Files whose stem is not a valid account name (settings, audit log,
    /// temp files) are ignored.
    pub fn names(&self) -> Result<Vec<AccountName>, AccountError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            AccountError::Storage(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(name) = AccountName::parse(stem) {
                    // Skip stems that trimming changed, they do not round-trip
                    if name.as_str() == stem {
                        names.push(name);
                    }
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
