//! Append-only audit log
//!
//! One JSON object per line. A missing log is an empty history.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{AccountError, AccountResult};
use crate::models::AccountName;

use super::entry::AuditEntry;

fn log_error(action: &str, path: &Path, err: impl std::fmt::Display) -> AccountError {
    AccountError::Io(format!("could not {} audit log {}: {}", action, path.display(), err))
}

/// Appends and reads back `AuditEntry` lines
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single write, so a line is never split
    pub fn log(&self, entry: &AuditEntry) -> AccountResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| log_error("open", &self.log_path, e))?;

        file.write_all(&line)
            .and_then(|()| file.flush())
            .map_err(|e| log_error("append to", &self.log_path, e))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> AccountResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(log_error("open", &self.log_path, e)),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| log_error("read", &self.log_path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                AccountError::Json(format!("audit log line {}: {}", index + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, optionally only those for one account
    pub fn read_recent(
        &self,
        count: usize,
        account: Option<&AccountName>,
    ) -> AccountResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        if let Some(account) = account {
            entries.retain(|e| e.account == account.as_str());
        }
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
