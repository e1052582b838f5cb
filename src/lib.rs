//! fundbook - a small personal ledger
//!
//! Accounts hold a cash and a card balance. Transactions debit one of them and
//! can be reversed exactly once. Item categories are loaded from a file at
//! start-up.
//!
//! # Architecture
//!
//! - `config`: paths, settings and category loading
//! - `error`: error types
//! - `models`: accounts, transactions, money, ids and the field directory
//! - `services`: the account registry, the transaction ledger and the book
//!   coordinating them
//! - `display`: plain-text tables
//! - `cli`: script commands and the script runner
//!
//! # Example
//!
//! ```rust
//! use fundbook::models::{CategorySet, CreateTransactionInput, Money, PaymentMethod};
//! use fundbook::services::Book;
//!
//! let book = Book::new(CategorySet::new(["BOOKS"]));
//! let id = book
//!     .accounts()
//!     .create_account("Ann", "Lee", Money::from_units(100), Money::from_units(100))
//!     .unwrap();
//!
//! book.transactions()
//!     .create_transaction(&CreateTransactionInput {
//!         user_id: id.to_string(),
//!         cost: Money::from_units(30),
//!         payment_method: PaymentMethod::Card,
//!         item: "book".into(),
//!         quantity: 1,
//!         item_category: "BOOKS".into(),
//!         vendor: "shop".into(),
//!     })
//!     .unwrap();
//!
//! let account = book.accounts().get_account(id.as_str()).unwrap();
//! assert_eq!(account.balance_card(), Money::from_units(70));
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

pub use error::{LedgerError, LedgerResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins over `default_filter` when set. Later calls do nothing.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
