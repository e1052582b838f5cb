//! Service layer for fundbook
//!
//! The account registry owns accounts, the transaction ledger owns their
//! histories and moves money, and the book coordinates operations spanning
//! both.

pub mod account;
pub mod book;
pub mod transaction;

pub use account::{AccountRegistry, BalanceFilter};
pub use book::{AttributeDirectory, Book};
pub use transaction::TransactionLedger;
