//! Service layer
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and auditing.

pub mod account;

pub use account::{parse_amount, AccountService, Committed};
