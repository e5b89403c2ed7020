//! Display formatting for terminal output
//!
//! Formats balances, account tables and history, and renders status
//! messages through the `Notifier` seam.

pub mod account;
pub mod notifier;

pub use account::{format_account_list, format_balance, format_history};
pub use notifier::{ConsoleNotifier, Level, Notifier};
