//! Custom error types for the account book
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for account operations
#[derive(Error, Debug)]
pub enum AccountError {
    /// An account with this name is already on disk
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// No record for this account name
    #[error("Account does not exist: {0}")]
    NotFound(String),

    /// Amount text is not a positive number
    #[error("Invalid amount: '{0}'. Enter a positive number such as 25 or 10.50")]
    InvalidAmount(String),

    /// Withdrawal larger than the stored balance
    #[error("Insufficient funds in '{account}': requested {requested}, available {available}")]
    InsufficientFunds {
        account: String,
        requested: Money,
        available: Money,
    },

    /// Account name cannot be used as a storage key
    #[error("Invalid account name: {0}")]
    InvalidName(String),

    /// Record read/write errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccountError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from the storage layer rather than user input
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Json(_))
    }
}

impl From<std::io::Error> for AccountError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AccountError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for account operations
pub type AccountResult<T> = Result<T, AccountError>;
