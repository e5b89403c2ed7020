//! Audit logging
//!
//! Records every successful account creation, deposit and withdrawal with
//! the balance before and after, in an append-only audit log next to the
//! account records.
//!
//! - `AuditEntry`: a single entry with timestamp, operation, account and
//!   balances.
//! - `AuditLogger`: writes entries as line-delimited JSON (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_accounts::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&name, Money::zero()))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
