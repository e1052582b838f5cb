//! Book: the registry and ledger wired together
//!
//! Operations that touch both sides (re-keying an account, deleting one) go
//! through the book so the account and its history change in one critical
//! section. Everything else is reached through `accounts()` and
//! `transactions()`.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::info;

use super::account::AccountRegistry;
use super::transaction::TransactionLedger;
use crate::config::{IdMode, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, CategorySet, FieldDescriptor, FieldValue, IdGenerator, RandomDigits, RandomHex,
    SequentialIds,
};

/// Editable fields of every entity, by name and kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDirectory {
    pub account: Vec<FieldDescriptor>,
    pub transaction: Vec<FieldDescriptor>,
}

/// Coordinator over the account registry and the transaction ledger
pub struct Book {
    accounts: Arc<AccountRegistry>,
    transactions: TransactionLedger,
    gate: Mutex<()>,
}

impl Book {
    /// A book with random ids
    pub fn new(categories: CategorySet) -> Self {
        Self::with_id_generators(
            categories,
            RandomDigits::account_ids(),
            RandomHex::transaction_ids(),
        )
    }

    pub fn with_id_generators(
        categories: CategorySet,
        account_ids: impl IdGenerator + 'static,
        transaction_ids: impl IdGenerator + 'static,
    ) -> Self {
        let accounts = Arc::new(AccountRegistry::with_id_generator(account_ids));
        let transactions =
            TransactionLedger::with_id_generator(Arc::clone(&accounts), categories, transaction_ids);

        Self {
            accounts,
            transactions,
            gate: Mutex::new(()),
        }
    }

    /// A book whose id scheme follows the user's settings
    pub fn from_settings(settings: &Settings, categories: CategorySet) -> Self {
        match settings.id_mode {
            IdMode::Random => Self::new(categories),
            IdMode::Sequential => Self::with_id_generators(
                categories,
                SequentialIds::account_ids(),
                SequentialIds::transaction_ids(),
            ),
        }
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, ()>> {
        self.gate
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire book lock: {}", e)))
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn transactions(&self) -> &TransactionLedger {
        &self.transactions
    }

    /// Update an account; a changed id carries its history along
    pub fn update_account(&self, id: &str, fields: &[(&str, FieldValue)]) -> LedgerResult<Account> {
        let _gate = self.lock()?;

        let updated = self.accounts.update_account(id, fields)?;
        if updated.id().as_str() != id {
            self.transactions.rekey_account(id, updated.id())?;
        }
        Ok(updated)
    }

    /// Delete an account together with its transaction history
    pub fn delete_account(
        &self,
        id: &str,
        created_date: &str,
        name: &str,
        second_name: &str,
    ) -> LedgerResult<Account> {
        let _gate = self.lock()?;

        let removed = self
            .accounts
            .delete_account(id, created_date, name, second_name)?;
        let dropped = self.transactions.drop_account(id)?;
        if dropped > 0 {
            info!(account_id = id, dropped, "Dropped history of deleted account");
        }
        Ok(removed)
    }

    pub fn attribute_directory(&self) -> AttributeDirectory {
        AttributeDirectory {
            account: self.accounts.editable_fields(),
            transaction: self.transactions.transaction_fields(),
        }
    }
}
