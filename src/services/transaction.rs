//! Transaction ledger
//!
//! Records debits against accounts and reverses them. The ledger shares the
//! account registry and is the only code that moves money: a transaction
//! debits one balance when it is recorded and a reversal credits the same
//! balance and removes the record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::account::AccountRegistry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AccountId, CategorySet, CreateTransactionInput, FieldDescriptor, IdGenerator, RandomHex,
    Transaction, TransactionId,
};

const MAX_ID_ATTEMPTS: usize = 1_000;

type History = HashMap<AccountId, Vec<Transaction>>;

/// Per-account transaction history plus the balance effects that go with it
pub struct TransactionLedger {
    accounts: Arc<AccountRegistry>,
    categories: CategorySet,
    data: RwLock<History>,
    ids: Mutex<Box<dyn IdGenerator>>,
}

impl TransactionLedger {
    /// Create an empty ledger issuing random 20-character ids
    pub fn new(accounts: Arc<AccountRegistry>, categories: CategorySet) -> Self {
        Self::with_id_generator(accounts, categories, RandomHex::transaction_ids())
    }

    pub fn with_id_generator(
        accounts: Arc<AccountRegistry>,
        categories: CategorySet,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        Self {
            accounts,
            categories,
            data: RwLock::new(HashMap::new()),
            ids: Mutex::new(Box::new(ids)),
        }
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, History>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, History>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn fresh_id(&self, data: &History) -> LedgerResult<TransactionId> {
        let mut ids = self
            .ids
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire id lock: {}", e)))?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = TransactionId::parse(&ids.next_id())?;
            let taken = data.values().flatten().any(|t| t.id() == &candidate);
            if !taken {
                return Ok(candidate);
            }
        }

        Err(LedgerError::Storage(
            "Could not generate an unused transaction id".into(),
        ))
    }

    fn ensure_account(&self, user_id: &str) -> LedgerResult<()> {
        if self.accounts.contains(user_id)? {
            Ok(())
        } else {
            Err(LedgerError::account_not_found(user_id))
        }
    }

    /// The registry this ledger debits and credits
    pub fn accounts(&self) -> &Arc<AccountRegistry> {
        &self.accounts
    }

    /// The item categories transactions are checked against
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Record a transaction and debit the account
    ///
    /// The record is only stored once both construction and the debit have
    /// succeeded, so a rejected transaction leaves no trace.
    pub fn create_transaction(&self, input: &CreateTransactionInput) -> LedgerResult<TransactionId> {
        let account = self.accounts.get_account(&input.user_id)?;

        let mut data = self.write()?;
        let id = self.fresh_id(&data)?;
        let transaction = Transaction::new(
            id.clone(),
            account.id().clone(),
            input,
            &self.categories,
            Utc::now().date_naive(),
        )?;

        let remaining = self.accounts.debit(
            account.id().as_str(),
            transaction.payment_method(),
            transaction.cost(),
        )?;

        info!(
            transaction_id = %id,
            account_id = %account.id(),
            cost = %transaction.cost(),
            method = %transaction.payment_method(),
            remaining = %remaining,
            "Recorded transaction"
        );
        data.entry(account.id().clone())
            .or_default()
            .push(transaction);

        Ok(id)
    }

    /// Every transaction of an account, oldest first
    pub fn get_user_transactions(&self, user_id: &str) -> LedgerResult<Vec<Transaction>> {
        self.ensure_account(user_id)?;

        let history = self.read()?.get(user_id).cloned().unwrap_or_default();
        if history.is_empty() {
            warn!(account_id = user_id, "Account has no transactions");
        }
        Ok(history)
    }

    /// One transaction of an account, if it exists
    pub fn get_user_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> LedgerResult<Option<Transaction>> {
        self.ensure_account(user_id)?;
        debug!(account_id = user_id, transaction_id, "Looking up transaction");

        Ok(self
            .read()?
            .get(user_id)
            .and_then(|history| history.iter().find(|t| t.id().as_str() == transaction_id))
            .cloned())
    }

    /// Undo a transaction: credit the cost back and remove the record
    ///
    /// An unknown transaction id is not an error. Nothing changes, a warning is
    /// logged and `None` comes back.
    pub fn reverse_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> LedgerResult<Option<Transaction>> {
        let mut data = self.write()?;
        self.ensure_account(user_id)?;

        let position = data.get(user_id).and_then(|history| {
            history
                .iter()
                .position(|t| t.id().as_str() == transaction_id)
        });

        let (Some(position), Some(history)) = (position, data.get_mut(user_id)) else {
            warn!(
                account_id = user_id,
                transaction_id, "No such transaction to reverse"
            );
            return Ok(None);
        };

        let transaction = &history[position];
        let restored = self.accounts.credit(
            user_id,
            transaction.payment_method(),
            transaction.cost(),
        )?;

        let reversed = history.remove(position);
        info!(
            transaction_id,
            account_id = user_id,
            cost = %reversed.cost(),
            balance = %restored,
            "Reversed transaction"
        );
        Ok(Some(reversed))
    }

    /// Names and kinds of the fields a transaction is created from
    pub fn transaction_fields(&self) -> Vec<FieldDescriptor> {
        Transaction::input_fields()
    }

    /// Move an account's history to its new id
    pub(crate) fn rekey_account(&self, old_id: &str, new_id: &AccountId) -> LedgerResult<()> {
        let mut data = self.write()?;
        if let Some(mut history) = data.remove(old_id) {
            for transaction in &mut history {
                transaction.reassign(new_id.clone());
            }
            debug!(old_id, new_id = %new_id, moved = history.len(), "Moved transaction history");
            data.insert(new_id.clone(), history);
        }
        Ok(())
    }

    /// Forget an account's history, returning how many records went
    pub(crate) fn drop_account(&self, id: &str) -> LedgerResult<usize> {
        let removed = self.write()?.remove(id).map_or(0, |history| history.len());
        debug!(account_id = id, removed, "Dropped transaction history");
        Ok(removed)
    }
}
