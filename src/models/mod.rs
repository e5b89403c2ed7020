//! Core data models for the account book
//!
//! This module contains the data structures that represent the domain:
//! validated account names, persisted account records, and money amounts.

pub mod account;
pub mod money;

pub use account::{Account, AccountName, AccountRecord, AccountValidationError};
pub use money::{Money, MoneyParseError};
