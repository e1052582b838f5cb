//! Core data models for fundbook
//!
//! This module contains the value types of the ledger domain: accounts,
//! transactions, money, ids, item categories and the field directory.

pub mod account;
pub mod category;
pub mod fields;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, DeletionConfirmation};
pub use category::CategorySet;
pub use fields::{FieldDescriptor, FieldKind, FieldValue};
pub use ids::{AccountId, IdGenerator, RandomDigits, RandomHex, SequentialIds, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{CreateTransactionInput, PaymentMethod, Transaction};
