//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AccountName, Money};

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Account was opened
    Create,
    /// Funds were added
    Deposit,
    /// Funds were taken out
    Withdraw,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Deposit => write!(f, "DEPOSIT"),
            Operation::Withdraw => write!(f, "WITHDRAW"),
        }
    }
}

/// A single audit log entry
///
/// Records one successful mutation of an account record with the balance
/// before and after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Name of the affected account
    pub account: String,

    /// Amount moved, absent for account creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Balance before the operation, absent for account creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_before: Option<Money>,

    /// Balance after the operation
    pub balance_after: Money,
}

impl AuditEntry {
    /// Entry for a newly created account
    pub fn create(account: &AccountName, balance: Money) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            account: account.to_string(),
            amount: None,
            balance_before: None,
            balance_after: balance,
        }
    }

    /// Entry for a deposit or withdrawal
    pub fn movement(
        operation: Operation,
        account: &AccountName,
        amount: Money,
        before: Money,
        after: Money,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            account: account.to_string(),
            amount: Some(amount),
            balance_before: Some(before),
            balance_after: after,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.account
        );

        if let Some(amount) = self.amount {
            output.push_str(&format!(" {}", amount));
        }

        match self.balance_before {
            Some(before) => {
                output.push_str(&format!(" (balance: {} -> {})", before, self.balance_after))
            }
            None => output.push_str(&format!(" (balance: {})", self.balance_after)),
        }

        output
    }
}
