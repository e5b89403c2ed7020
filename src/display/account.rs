//! Account display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::audit::AuditEntry;
use crate::models::{Account, Money};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let total = accounts
        .iter()
        .try_fold(Money::zero(), |acc, a| acc.checked_add(a.balance));

    let mut rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.to_string(),
            balance: a.balance.format_with_symbol(symbol),
        })
        .collect();

    if let Some(total) = total {
        rows.push(AccountRow {
            name: "TOTAL".to_string(),
            balance: total.format_with_symbol(symbol),
        });
    }

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string()
}

/// "Your balance is $60.00."
pub fn format_balance(balance: Money, symbol: &str) -> String {
    format!("Your balance is {}.", balance.format_with_symbol(symbol))
}

/// Format audit entries, one per line
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
