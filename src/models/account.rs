//! Account model
//!
//! An account is a name plus a balance. The name doubles as the storage
//! key, so it is validated before it is ever turned into a file path.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Maximum length of an account name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// A validated account name
///
/// Names are case-sensitive and stored verbatim apart from trimming
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Parse and validate a name entered by the user
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(AccountValidationError::NameTooLong(len));
        }

        if name.starts_with('.') {
            return Err(AccountValidationError::LeadingDot);
        }

        if let Some(c) = name
            .chars()
            .find(|c| matches!(c, '/' | '\\') || c.is_control())
        {
            return Err(AccountValidationError::ForbiddenChar(c));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this account's record
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The persisted document for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Current balance, never negative
    pub balance: Money,
}

impl AccountRecord {
    /// A freshly opened account
    pub fn new() -> Self {
        Self::default()
    }
}

/// An account together with its balance, as listed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: AccountName,
    pub balance: Money,
}

impl Account {
    pub fn from_record(name: AccountName, record: AccountRecord) -> Self {
        Self {
            name,
            balance: record.balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

/// Validation errors for account names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    LeadingDot,
    ForbiddenChar(char),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Account name too long ({} chars, max {})",
                    len, MAX_NAME_LEN
                )
            }
            Self::LeadingDot => write!(f, "Account name cannot start with '.'"),
            Self::ForbiddenChar(c) => {
                write!(f, "Account name cannot contain {:?}", c)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
