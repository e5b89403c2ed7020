//! Storage layer
//!
//! One atomically written JSON record per account in the data directory,
//! plus the audit log that sits next to them.

pub mod accounts;
pub mod file_io;

pub use accounts::AccountRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::AccountsPaths;
use crate::error::AccountError;

/// Main storage coordinator
pub struct Storage {
    pub accounts: AccountRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with auditing enabled
    pub fn new(paths: &AccountsPaths) -> Result<Self, AccountError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.data_dir().clone()),
            audit: Some(AuditLogger::new(paths.audit_log())),
        })
    }

    /// Turn audit logging off
    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a completed mutation in the audit log
    pub fn log_audit(&self, entry: &AuditEntry) -> Result<(), AccountError> {
        match &self.audit {
            Some(logger) => logger.log(entry),
            None => Ok(()),
        }
    }
}
