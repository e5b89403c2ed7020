//! Account CLI commands
//!
//! One-shot equivalents of the menu actions, for scripts and shell use.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_account_list, format_balance, format_history, Notifier};
use crate::error::{AccountError, AccountResult};
use crate::models::AccountName;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create a new account with a zero balance
    Create {
        /// Account name
        name: String,
    },
    /// Show an account's balance
    Balance {
        /// Account name
        name: String,
    },
    /// Deposit funds into an account
    Deposit {
        /// Account name
        name: String,
        /// Amount, e.g. "100" or "12.50"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Withdraw funds from an account
    Withdraw {
        /// Account name
        name: String,
        /// Amount, e.g. "40" or "9.99"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List all accounts with their balances
    List,
    /// Show recent audit log entries
    History {
        /// Only show entries for this account
        #[arg(short, long)]
        account: Option<String>,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an account command
pub fn handle_account_command<N: Notifier>(
    storage: &Storage,
    settings: &Settings,
    notifier: &mut N,
    cmd: AccountCommands,
) -> AccountResult<()> {
    let service = AccountService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create { name } => {
            let created = service.create(&name)?;
            notifier.success(&format!("Created account: {}", created.value.name))?;
            warn_audit(notifier, created.audit_error)?;
        }

        AccountCommands::Balance { name } => {
            let balance = service.get_balance(&name)?;
            notifier.info(&format_balance(balance, symbol))?;
        }

        AccountCommands::Deposit { name, amount } => {
            let deposit = service.deposit(&name, &amount)?;
            notifier.success(&format!(
                "Deposited into {}. New balance: {}",
                name.trim(),
                deposit.value.format_with_symbol(symbol)
            ))?;
            warn_audit(notifier, deposit.audit_error)?;
        }

        AccountCommands::Withdraw { name, amount } => {
            let withdrawal = service.withdraw(&name, &amount)?;
            notifier.success(&format!(
                "Withdrew from {}. New balance: {}",
                name.trim(),
                withdrawal.value.format_with_symbol(symbol)
            ))?;
            warn_audit(notifier, withdrawal.audit_error)?;
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            notifier.plain(&format_account_list(&accounts, symbol))?;
        }

        AccountCommands::History { account, limit } => {
            let logger = storage.audit().ok_or_else(|| {
                AccountError::Config("Audit logging is disabled in settings".into())
            })?;
            let account = account
                .as_deref()
                .map(AccountName::parse)
                .transpose()
                .map_err(|e| AccountError::InvalidName(e.to_string()))?;
            let entries = logger.read_recent(limit, account.as_ref())?;
            notifier.plain(&format_history(&entries))?;
        }
    }

    Ok(())
}

/// The mutation stands, so a failed audit append is only a warning
fn warn_audit<N: Notifier>(
    notifier: &mut N,
    audit_error: Option<AccountError>,
) -> AccountResult<()> {
    if let Some(e) = audit_error {
        notifier.warning(&format!("Audit log not updated: {}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccountsPaths;
    use crate::display::ConsoleNotifier;
    use tempfile::TempDir;

    fn run(storage: &Storage, cmd: AccountCommands) -> (AccountResult<()>, String) {
        let mut notifier = ConsoleNotifier::new(Vec::new(), false);
        let result = handle_account_command(storage, &Settings::default(), &mut notifier, cmd);
        (result, String::from_utf8(notifier.into_inner()).unwrap())
    }

    #[test]
    fn test_create_deposit_withdraw_balance() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path())).unwrap();

        let (result, out) = run(&storage, AccountCommands::Create { name: "alice".into() });
        result.unwrap();
        assert!(out.contains("Created account: alice"));

        let (result, out) = run(
            &storage,
            AccountCommands::Deposit {
                name: "alice".into(),
                amount: "100".into(),
            },
        );
        result.unwrap();
        assert!(out.contains("New balance: $100.00"));

        let (result, _) = run(
            &storage,
            AccountCommands::Withdraw {
                name: "alice".into(),
                amount: "40".into(),
            },
        );
        result.unwrap();

        let (result, out) = run(&storage, AccountCommands::Balance { name: "alice".into() });
        result.unwrap();
        assert_eq!(out, "Your balance is $60.00.\n");
    }

    #[test]
    fn test_errors_propagate() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path())).unwrap();

        let (result, out) = run(&storage, AccountCommands::Balance { name: "ghost".into() });
        assert!(result.unwrap_err().is_not_found());
        assert!(out.is_empty());
    }

    #[test]
    fn test_history() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path())).unwrap();
        run(&storage, AccountCommands::Create { name: "alice".into() }).0.unwrap();
        run(
            &storage,
            AccountCommands::Deposit {
                name: "alice".into(),
                amount: "5".into(),
            },
        )
        .0
        .unwrap();

        let (result, out) = run(
            &storage,
            AccountCommands::History {
                account: Some("alice".into()),
                limit: 20,
            },
        );
        result.unwrap();
        assert!(out.contains("CREATE alice"));
        assert!(out.contains("DEPOSIT alice $5.00"));
    }

    #[test]
    fn test_history_requires_audit() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path()))
            .unwrap()
            .without_audit();

        let (result, _) = run(
            &storage,
            AccountCommands::History {
                account: None,
                limit: 5,
            },
        );
        assert!(matches!(result, Err(AccountError::Config(_))));
    }

    #[test]
    fn test_audit_failure_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path())).unwrap();
        run(&storage, AccountCommands::Create { name: "alice".into() }).0.unwrap();
        let log = temp_dir.path().join(".audit.log");
        std::fs::remove_file(&log).unwrap();
        std::fs::create_dir(&log).unwrap();

        let (result, out) = run(
            &storage,
            AccountCommands::Deposit {
                name: "alice".into(),
                amount: "25".into(),
            },
        );
        result.unwrap();
        assert!(out.contains("New balance: $25.00"));
        assert!(out.contains("Audit log not updated"));
    }
}
