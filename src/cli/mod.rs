//! CLI command handlers
//!
//! Bridges user input, either the interactive menu or clap subcommands,
//! with the service layer.

pub mod account;
pub mod input;
pub mod menu;

pub use account::{handle_account_command, AccountCommands};
pub use input::{InputSource, LineInput, ScriptedInput};
pub use menu::{Action, Menu};
