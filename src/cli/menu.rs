//! Interactive menu
//!
//! A plain loop: show the actions, run the chosen one, come back. Each
//! action is retried in place while it reports `Attempt::Retry`, so a
//! mistyped name or amount re-prompts without growing the stack.

use std::fmt;
use std::io;

use crate::display::{format_balance, Notifier};
use crate::error::AccountError;
use crate::models::Money;
use crate::services::AccountService;

use super::input::InputSource;

/// One of the five top-level menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    CheckBalance,
    Deposit,
    Withdraw,
    Logout,
}

impl Action {
    /// All actions in menu order
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::CheckBalance,
        Action::Deposit,
        Action::Withdraw,
        Action::Logout,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "Create a new account",
            Action::CheckBalance => "Check balance",
            Action::Deposit => "Deposit",
            Action::Withdraw => "Withdraw",
            Action::Logout => "Logout",
        }
    }

    /// Parse a menu choice: its number (1-5) or its label, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }

        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.label().to_lowercase() == lower)
            .or(match lower.as_str() {
                "create" => Some(Action::Create),
                "balance" => Some(Action::CheckBalance),
                "exit" | "quit" => Some(Action::Logout),
                _ => None,
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one attempt at an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Finished, back to the menu
    Done,
    /// Rejected input, ask again
    Retry,
    /// User left the action, or it was aborted, back to the menu
    Cancel,
    /// Input ended, leave the program
    Quit,
}

/// What the menu loop should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu session
pub struct Menu<'a, I, N> {
    service: AccountService<'a>,
    input: I,
    notifier: N,
    symbol: String,
}

impl<'a, I: InputSource, N: Notifier> Menu<'a, I, N> {
    pub fn new(service: AccountService<'a>, input: I, notifier: N) -> Self {
        Self {
            service,
            input,
            notifier,
            symbol: "$".to_string(),
        }
    }

    /// Currency symbol used in messages
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Give back the notifier, e.g. to inspect captured output
    pub fn into_notifier(self) -> N {
        self.notifier
    }

    /// Run until the user logs out or input ends
    ///
    /// Only terminal I/O errors end the session early; account errors are
    /// reported and the menu continues.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;

            let choice = match self.input.read_line("What would you like to do?")? {
                Some(choice) => choice,
                None => return self.farewell(),
            };

            let Some(action) = Action::parse(&choice) else {
                self.notifier
                    .error(&format!("Unknown choice '{}', pick 1-5.", choice))?;
                continue;
            };

            if self.run_action(action)? == Flow::Exit {
                return self.farewell();
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        self.notifier.plain("")?;
        for (i, action) in Action::ALL.iter().enumerate() {
            self.notifier.plain(&format!("  {}. {}", i + 1, action))?;
        }
        Ok(())
    }

    fn farewell(&mut self) -> io::Result<()> {
        self.notifier.banner("Thanks for using Accounts!")
    }

    fn run_action(&mut self, action: Action) -> io::Result<Flow> {
        if action == Action::Logout {
            return Ok(Flow::Exit);
        }
        if action == Action::Create {
            self.notifier.banner("Account creation initiated!")?;
        }

        loop {
            let attempt = match action {
                Action::Create => self.create()?,
                Action::CheckBalance => self.check_balance()?,
                Action::Deposit => self.deposit()?,
                Action::Withdraw => self.withdraw()?,
                Action::Logout => Attempt::Quit,
            };

            match attempt {
                Attempt::Retry => continue,
                Attempt::Done | Attempt::Cancel => return Ok(Flow::Continue),
                Attempt::Quit => return Ok(Flow::Exit),
            }
        }
    }

    /// Ask a question; blank answers cancel, end of input quits
    fn ask(&mut self, prompt: &str) -> io::Result<Result<String, Attempt>> {
        Ok(match self.input.read_line(prompt)? {
            None => Err(Attempt::Quit),
            Some(answer) if answer.is_empty() => Err(Attempt::Cancel),
            Some(answer) => Ok(answer),
        })
    }

    /// Ask for the name of an account that must already exist
    fn ask_existing_account(&mut self) -> io::Result<Result<String, Attempt>> {
        let name = match self.ask("Enter your account name:")? {
            Ok(name) => name,
            Err(attempt) => return Ok(Err(attempt)),
        };

        if !self.service.exists(&name) {
            self.notifier
                .error("Account does not exist, enter another name.")?;
            return Ok(Err(Attempt::Retry));
        }

        Ok(Ok(name))
    }

    fn create(&mut self) -> io::Result<Attempt> {
        let name = match self.ask("Enter your account name:")? {
            Ok(name) => name,
            Err(attempt) => return Ok(attempt),
        };

        match self.service.create(&name) {
            Ok(created) => {
                self.notifier
                    .success("Congratulations! Your account has been created!")?;
                self.warn_audit(created.audit_error)?;
                Ok(Attempt::Done)
            }
            Err(AccountError::AlreadyExists(_)) => {
                self.notifier.error("This account already exists.")?;
                Ok(Attempt::Retry)
            }
            Err(e @ AccountError::InvalidName(_)) => {
                self.notifier.error(&e.to_string())?;
                Ok(Attempt::Retry)
            }
            Err(e) => self.reject(e),
        }
    }

    fn check_balance(&mut self) -> io::Result<Attempt> {
        let name = match self.ask_existing_account()? {
            Ok(name) => name,
            Err(attempt) => return Ok(attempt),
        };

        match self.service.get_balance(&name) {
            Ok(balance) => {
                let message = format_balance(balance, &self.symbol);
                self.notifier.info(&message)?;
                Ok(Attempt::Done)
            }
            Err(e) => self.reject(e),
        }
    }

    fn deposit(&mut self) -> io::Result<Attempt> {
        let name = match self.ask_existing_account()? {
            Ok(name) => name,
            Err(attempt) => return Ok(attempt),
        };
        let amount = match self.ask("Enter the amount you want to deposit:")? {
            Ok(amount) => amount,
            Err(attempt) => return Ok(attempt),
        };

        match self.service.deposit(&name, &amount) {
            Ok(deposit) => {
                let message = format!(
                    "Successfully deposited {}! New balance: {}",
                    self.money(&amount),
                    deposit.value.format_with_symbol(&self.symbol)
                );
                self.notifier.success(&message)?;
                self.warn_audit(deposit.audit_error)?;
                Ok(Attempt::Done)
            }
            Err(e) => self.reject(e),
        }
    }

    fn withdraw(&mut self) -> io::Result<Attempt> {
        let name = match self.ask_existing_account()? {
            Ok(name) => name,
            Err(attempt) => return Ok(attempt),
        };
        let amount = match self.ask("Enter the amount you want to withdraw:")? {
            Ok(amount) => amount,
            Err(attempt) => return Ok(attempt),
        };

        match self.service.withdraw(&name, &amount) {
            Ok(withdrawal) => {
                let message = format!(
                    "You withdrew {} from your account. New balance: {}",
                    self.money(&amount),
                    withdrawal.value.format_with_symbol(&self.symbol)
                );
                self.notifier.success(&message)?;
                self.warn_audit(withdrawal.audit_error)?;
                Ok(Attempt::Done)
            }
            Err(e) => self.reject(e),
        }
    }

    /// Report a rejected operation and decide whether to re-prompt
    fn reject(&mut self, err: AccountError) -> io::Result<Attempt> {
        match err {
            AccountError::InsufficientFunds { available, .. } => {
                let message = format!(
                    "Insufficient funds. Available: {}",
                    available.format_with_symbol(&self.symbol)
                );
                self.notifier.error(&message)?;
                Ok(Attempt::Retry)
            }
            AccountError::InvalidAmount(_) => {
                self.notifier.error(&err.to_string())?;
                Ok(Attempt::Retry)
            }
            AccountError::NotFound(_) => {
                self.notifier
                    .error("Account does not exist, enter another name.")?;
                Ok(Attempt::Retry)
            }
            err if err.is_storage() => {
                self.notifier.error(&format!("Operation aborted: {}", err))?;
                Ok(Attempt::Cancel)
            }
            other => {
                self.notifier.error(&other.to_string())?;
                Ok(Attempt::Cancel)
            }
        }
    }

    /// The change is already saved; only say the audit trail missed it
    fn warn_audit(&mut self, audit_error: Option<AccountError>) -> io::Result<()> {
        match audit_error {
            Some(e) => self.notifier.warning(&format!("Audit log not updated: {}", e)),
            None => Ok(()),
        }
    }

    /// Re-render validated amount text with the configured symbol
    fn money(&self, amount: &str) -> String {
        Money::parse(amount)
            .map(|m| m.format_with_symbol(&self.symbol))
            .unwrap_or_else(|_| amount.to_string())
    }
}
