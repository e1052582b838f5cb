//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for accounts and transactions.

pub mod account;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use transaction::{format_transaction_details, format_transaction_register};
