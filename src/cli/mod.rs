//! CLI command handlers
//!
//! This module contains the script commands, bridging the clap argument
//! parsing with the registry and ledger, and the runner that feeds them.

pub mod account;
pub mod script;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use script::{run_script, ScriptSummary};
pub use transaction::{handle_transaction_command, TransactionCommands};
