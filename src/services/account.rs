//! Account service
//!
//! The account store: create accounts, look up balances, and apply
//! validated deposits and withdrawals. Every mutation is a full
//! load -> validate -> mutate -> save of the account record.

use crate::audit::{AuditEntry, Operation};
use crate::error::{AccountError, AccountResult};
use crate::models::{Account, AccountName, AccountRecord, Money};
use crate::storage::Storage;

/// Parse user-entered amount text into a strictly positive amount
///
/// Non-numeric text, zero and negative values are all `InvalidAmount`.
pub fn parse_amount(text: &str) -> AccountResult<Money> {
    let amount =
        Money::parse(text).map_err(|_| AccountError::InvalidAmount(text.trim().to_string()))?;

    if !amount.is_positive() {
        return Err(AccountError::InvalidAmount(text.trim().to_string()));
    }

    Ok(amount)
}

/// A mutation whose record write succeeded
///
/// `audit_error` holds the failure to append the audit entry, if any. The
/// record change stands either way, so callers must not retry it.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub audit_error: Option<AccountError>,
}

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Open a new account with a zero balance
    pub fn create(&self, name: &str) -> AccountResult<Committed<Account>> {
        let name =
            AccountName::parse(name).map_err(|e| AccountError::InvalidName(e.to_string()))?;

        let record = AccountRecord::new();
        self.storage.accounts.insert_new(&name, &record)?;

        let entry = AuditEntry::create(&name, record.balance);
        Ok(self.commit(Account::from_record(name, record), &entry))
    }

    /// Check whether a record exists for `name`
    ///
    /// Names that could never be stored simply don't exist.
    pub fn exists(&self, name: &str) -> bool {
        AccountName::parse(name)
            .map(|name| self.storage.accounts.exists(&name))
            .unwrap_or(false)
    }

    /// Current balance of an account
    pub fn get_balance(&self, name: &str) -> AccountResult<Money> {
        let (_, record) = self.load(name)?;
        Ok(record.balance)
    }

    /// Add `amount` to an account and return the new balance
    pub fn deposit(&self, name: &str, amount: &str) -> AccountResult<Committed<Money>> {
        let (name, mut record) = self.load(name)?;
        let amount = parse_amount(amount)?;

        let before = record.balance;
        record.balance = before
            .checked_add(amount)
            .ok_or_else(|| AccountError::InvalidAmount(amount.to_string()))?;

        self.storage.accounts.save(&name, &record)?;

        let entry =
            AuditEntry::movement(Operation::Deposit, &name, amount, before, record.balance);
        Ok(self.commit(record.balance, &entry))
    }

    /// Take `amount` out of an account and return the new balance
    pub fn withdraw(&self, name: &str, amount: &str) -> AccountResult<Committed<Money>> {
        let (name, mut record) = self.load(name)?;
        let amount = parse_amount(amount)?;

        let before = record.balance;
        if amount > before {
            return Err(AccountError::InsufficientFunds {
                account: name.to_string(),
                requested: amount,
                available: before,
            });
        }

        record.balance = before
            .checked_sub(amount)
            .ok_or_else(|| AccountError::InvalidAmount(amount.to_string()))?;

        self.storage.accounts.save(&name, &record)?;

        let entry =
            AuditEntry::movement(Operation::Withdraw, &name, amount, before, record.balance);
        Ok(self.commit(record.balance, &entry))
    }

    /// All accounts with their balances, sorted by name
    ///
    /// Records that fail to parse are skipped.
    pub fn list(&self) -> AccountResult<Vec<Account>> {
        let mut accounts = Vec::new();

        for name in self.storage.accounts.names()? {
            if let Ok(Some(record)) = self.storage.accounts.load(&name) {
                accounts.push(Account::from_record(name, record));
            }
        }

        Ok(accounts)
    }

    fn commit<T>(&self, value: T, entry: &AuditEntry) -> Committed<T> {
        Committed {
            value,
            audit_error: self.storage.log_audit(entry).err(),
        }
    }

    fn load(&self, name: &str) -> AccountResult<(AccountName, AccountRecord)> {
        let parsed =
            AccountName::parse(name).map_err(|_| AccountError::NotFound(name.trim().to_string()))?;

        match self.storage.accounts.load(&parsed)? {
            Some(record) => Ok((parsed, record)),
            None => Err(AccountError::NotFound(parsed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccountsPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&AccountsPaths::with_data_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn audit_count(storage: &Storage) -> usize {
        storage.audit().unwrap().read_all().unwrap().len()
    }

    #[test]
    fn test_create_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service.create("alice").unwrap().value;
        assert_eq!(account.name.as_str(), "alice");
        assert_eq!(account.balance, Money::zero());
        assert!(service.exists("alice"));
        assert_eq!(service.get_balance("alice").unwrap(), Money::zero());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("alice").unwrap();
        let result = service.create("alice");
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("alice").unwrap();
        service.deposit("alice", "10").unwrap();

        // Case-insensitive filesystems fold these together
        if !service.exists("ALICE") {
            service.create("ALICE").unwrap();
            assert_eq!(service.get_balance("ALICE").unwrap(), Money::zero());
        }
        assert_eq!(service.get_balance("alice").unwrap().cents(), 1000);
    }

    #[test]
    fn test_create_invalid_name() {
        let (temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        for bad in ["", "   ", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                service.create(bad),
                Err(AccountError::InvalidName(_))
            ));
        }
        assert!(!temp_dir.path().parent().unwrap().join("escape.json").exists());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_deposit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();

        assert_eq!(service.deposit("alice", "100").unwrap().value.cents(), 10000);
        assert_eq!(service.deposit("alice", "0.5").unwrap().value.cents(), 10050);
        assert!(service.deposit("alice", "1").unwrap().audit_error.is_none());
        assert_eq!(service.get_balance("alice").unwrap().cents(), 10050);
    }

    #[test]
    fn test_withdraw() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();
        service.deposit("alice", "100").unwrap();

        assert_eq!(service.withdraw("alice", "40").unwrap().value.cents(), 6000);
        assert_eq!(service.withdraw("alice", "60").unwrap().value, Money::zero());
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();
        service.deposit("alice", "60").unwrap();

        let err = service.withdraw("alice", "60.01").unwrap_err();
        match err {
            AccountError::InsufficientFunds {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested.cents(), 6001);
                assert_eq!(available.cents(), 6000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(service.get_balance("alice").unwrap().cents(), 6000);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();
        service.deposit("alice", "10").unwrap();

        for bad in ["", "abc", "0", "0.00", "-5", "1e3", "NaN", "1.234"] {
            assert!(
                matches!(service.deposit("alice", bad), Err(AccountError::InvalidAmount(_))),
                "deposit accepted {:?}",
                bad
            );
            assert!(
                matches!(service.withdraw("alice", bad), Err(AccountError::InvalidAmount(_))),
                "withdraw accepted {:?}",
                bad
            );
        }
        assert_eq!(service.get_balance("alice").unwrap().cents(), 1000);
    }

    #[test]
    fn test_missing_account_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        assert!(!service.exists("ghost"));
        assert!(service.get_balance("ghost").unwrap_err().is_not_found());
        assert!(service.deposit("ghost", "10").unwrap_err().is_not_found());
        assert!(service.withdraw("ghost", "10").unwrap_err().is_not_found());
        // Existence is checked before the amount
        assert!(service.deposit("ghost", "abc").unwrap_err().is_not_found());
        assert!(service.get_balance("../x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        assert_eq!(service.create("alice").unwrap().value.balance, Money::zero());
        assert_eq!(service.deposit("alice", "100").unwrap().value.cents(), 10000);
        assert_eq!(service.withdraw("alice", "40").unwrap().value.cents(), 6000);
        assert!(matches!(
            service.withdraw("alice", "1000"),
            Err(AccountError::InsufficientFunds { .. })
        ));
        assert_eq!(service.get_balance("alice").unwrap().cents(), 6000);
    }

    #[test]
    fn test_record_on_disk() {
        let (temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();
        service.deposit("alice", "60.50").unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("alice.json")).unwrap();
        assert_eq!(raw, r#"{"balance":60.5}"#);
    }

    #[test]
    fn test_audit_only_records_successes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("alice").unwrap();
        service.deposit("alice", "100").unwrap();
        service.withdraw("alice", "40").unwrap();
        let _ = service.create("alice");
        let _ = service.withdraw("alice", "1000");
        let _ = service.deposit("alice", "-1");
        let _ = service.deposit("ghost", "1");

        assert_eq!(audit_count(&storage), 3);
        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries[2].operation, Operation::Withdraw);
        assert_eq!(entries[2].balance_before, Some(Money::from_cents(10000)));
        assert_eq!(entries[2].balance_after, Money::from_cents(6000));
    }

    #[test]
    fn test_audit_failure_does_not_undo_or_fail_the_mutation() {
        let (temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("alice").unwrap();

        // A directory where the log file should be makes every append fail
        let log = temp_dir.path().join(".audit.log");
        std::fs::remove_file(&log).unwrap();
        std::fs::create_dir(&log).unwrap();

        let deposit = service.deposit("alice", "100").unwrap();
        assert_eq!(deposit.value.cents(), 10000);
        assert!(deposit.audit_error.as_ref().is_some_and(|e| e.is_storage()));

        let withdrawal = service.withdraw("alice", "40").unwrap();
        assert_eq!(withdrawal.value.cents(), 6000);
        assert!(withdrawal.audit_error.is_some());

        let created = service.create("bob").unwrap();
        assert!(created.audit_error.is_some());
        assert!(service.exists("bob"));

        assert_eq!(service.get_balance("alice").unwrap().cents(), 6000);
    }

    #[test]
    fn test_list_accounts() {
        let (temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        service.create("bob").unwrap();
        service.create("alice").unwrap();
        service.deposit("bob", "5").unwrap();
        std::fs::write(temp_dir.path().join("broken.json"), "{").unwrap();

        let accounts = service.list().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name.as_str(), "alice");
        assert_eq!(accounts[1].balance.cents(), 500);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("25").unwrap().cents(), 2500);
        assert_eq!(parse_amount("$1.05").unwrap().cents(), 105);
        assert!(matches!(parse_amount("0"), Err(AccountError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-3"), Err(AccountError::InvalidAmount(_))));
    }
}
