//! bank-accounts - a terminal account book
//!
//! Create named accounts, deposit and withdraw funds, and check balances.
//! Each account is one small JSON record on disk.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: custom error types
//! - `models`: money, account names and account records
//! - `storage`: atomic JSON file storage, one file per account
//! - `audit`: append-only log of successful mutations
//! - `services`: the account store (create, balance, deposit, withdraw)
//! - `display`: message rendering and formatting
//! - `cli`: interactive menu and one-shot subcommands
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_accounts::config::AccountsPaths;
//! use bank_accounts::services::AccountService;
//! use bank_accounts::storage::Storage;
//!
//! let storage = Storage::new(&AccountsPaths::new())?;
//! let service = AccountService::new(&storage);
//! service.create("alice")?;
//! service.deposit("alice", "100")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{AccountError, AccountResult};
