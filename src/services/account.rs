//! Account registry
//!
//! Owns every `Account`, keyed by id. Provides creation, lookup, the
//! snapshot-and-rollback update path, confirmation-gated deletion and the
//! name/balance/date filters. Balance effects of transactions come in through
//! the crate-internal `debit`/`credit` methods used by the ledger.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, DeletionConfirmation, FieldDescriptor, FieldValue, IdGenerator, Money,
    PaymentMethod, RandomDigits,
};
use crate::validation::parse_date;

/// Attempts at drawing an unused id before giving up
const MAX_ID_ATTEMPTS: usize = 1_000;

type AccountMap = HashMap<AccountId, Account>;

/// Comparison flags for [`AccountRegistry::filter_by_balance`]
///
/// Without `total`, each supplied criterion is a strict lower bound unless its
/// `*_under` flag makes it a strict upper bound. With `total`, both criteria
/// are required and their sum is compared against cash + card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceFilter {
    pub total: bool,
    pub total_under: bool,
    pub cash_under: bool,
    pub card_under: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameField {
    Name,
    SecondName,
}

/// Registry of all accounts
pub struct AccountRegistry {
    data: RwLock<AccountMap>,
    ids: Mutex<Box<dyn IdGenerator>>,
}

impl AccountRegistry {
    /// Create an empty registry issuing random ten-digit ids
    pub fn new() -> Self {
        Self::with_id_generator(RandomDigits::account_ids())
    }

    /// Create an empty registry with a specific id source
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            ids: Mutex::new(Box::new(ids)),
        }
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, AccountMap>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, AccountMap>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn fresh_id(&self, data: &AccountMap) -> LedgerResult<AccountId> {
        let mut ids = self
            .ids
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire id lock: {}", e)))?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = AccountId::parse(&ids.next_id())?;
            if !data.contains_key(&candidate) {
                return Ok(candidate);
            }
        }

        Err(LedgerError::Storage(
            "Could not generate an unused account id".into(),
        ))
    }

    /// Create and store a new account dated today
    pub fn create_account(
        &self,
        name: &str,
        second_name: &str,
        balance_cash: Money,
        balance_card: Money,
    ) -> LedgerResult<AccountId> {
        // validate first so a rejected account doesn't use up an id
        Account::validate_fields(name, second_name, balance_cash, balance_card)?;

        let mut data = self.write()?;
        let id = self.fresh_id(&data)?;
        let account = Account::new(
            id.clone(),
            name,
            second_name,
            balance_cash,
            balance_card,
            Utc::now().date_naive(),
        )?;

        data.insert(id.clone(), account);
        info!(account_id = %id, "Created account");
        Ok(id)
    }

    /// Store an already-built account
    pub fn add_account(&self, account: Account) -> LedgerResult<AccountId> {
        let mut data = self.write()?;
        let id = account.id().clone();

        if data.contains_key(&id) {
            return Err(LedgerError::Validation(format!(
                "Account ID {} is already in use",
                id
            )));
        }

        data.insert(id.clone(), account);
        info!(account_id = %id, "Added account");
        Ok(id)
    }

    /// Get an account by id
    pub fn get_account(&self, id: &str) -> LedgerResult<Account> {
        debug!(account_id = id, "Looking up account");
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Get several accounts, failing on the first unknown id
    pub fn get_accounts(&self, ids: &[&str]) -> LedgerResult<Vec<Account>> {
        let data = self.read()?;
        ids.iter()
            .map(|id| {
                data.get(*id)
                    .cloned()
                    .ok_or_else(|| LedgerError::account_not_found(*id))
            })
            .collect()
    }

    pub fn contains(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    /// All accounts, oldest first
    pub fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        let data = self.read()?;
        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| {
            a.created_date()
                .cmp(&b.created_date())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(accounts)
    }

    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read()?.len())
    }

    /// Update several fields of an account as one unit
    ///
    /// Field names are checked against the account field table before anything
    /// changes. Each value then goes through the field's setter. If any setter
    /// fails, or a new id collides with another account, every field is put
    /// back from the pre-update snapshot and the original error is returned.
    /// Updating `id` re-keys the account. Reached through `Book`, which moves
    /// the account's transaction history along with it.
    pub(crate) fn update_account(
        &self,
        id: &str,
        fields: &[(&str, FieldValue)],
    ) -> LedgerResult<Account> {
        let mut data = self.write()?;

        if !data.contains_key(id) {
            return Err(LedgerError::account_not_found(id));
        }

        let setters = fields
            .iter()
            .map(|(name, value)| {
                Account::field(name).map(|field| (field, value)).ok_or_else(|| {
                    LedgerError::Attribute(format!(
                        "'{}' is not an editable attribute of Account",
                        name
                    ))
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        let mut account = data
            .remove(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        let snapshot = account.clone();

        let outcome = setters
            .iter()
            .try_for_each(|(field, value)| (field.apply)(&mut account, value))
            .and_then(|()| {
                if account.id() != snapshot.id() && data.contains_key(account.id()) {
                    Err(LedgerError::Validation(format!(
                        "Account ID {} is already in use",
                        account.id()
                    )))
                } else {
                    Ok(())
                }
            });

        match outcome {
            Ok(()) => {
                if account.id() != snapshot.id() {
                    info!(old_id = %snapshot.id(), new_id = %account.id(), "Re-keyed account");
                }
                info!(account_id = %account.id(), fields = fields.len(), "Updated account");
                let updated = account.clone();
                data.insert(account.id().clone(), account);
                Ok(updated)
            }
            Err(err) => {
                if account.restore(&snapshot).is_err() {
                    account = snapshot.clone();
                }
                warn!(account_id = id, error = %err, "Account update rolled back");
                data.insert(snapshot.id().clone(), account);
                Err(err)
            }
        }
    }

    /// Delete an account after the caller repeats its details back
    ///
    /// Reached through `Book`, which drops the history too.
    pub(crate) fn delete_account(
        &self,
        id: &str,
        created_date: &str,
        name: &str,
        second_name: &str,
    ) -> LedgerResult<Account> {
        let mut data = self.write()?;
        let account = data
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        let confirmation = DeletionConfirmation {
            created_date,
            name,
            second_name,
        };
        if !confirmation.matches(account) {
            return Err(LedgerError::Validation(format!(
                "Details given for account {} do not match; nothing was deleted",
                id
            )));
        }

        let removed = data
            .remove(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        info!(account_id = id, "Deleted account");
        Ok(removed)
    }

    /// Filter by name and/or second name
    ///
    /// Exact match unless `pattern_mode`, in which case each criterion only has
    /// to be contained in the field. Criteria are ANDed; none returns all.
    pub fn filter_by_name(
        &self,
        pattern_mode: bool,
        criteria: &[(&str, FieldValue)],
    ) -> LedgerResult<Vec<Account>> {
        let criteria = criteria
            .iter()
            .map(|(attr, value)| {
                let field = match *attr {
                    "name" => NameField::Name,
                    "second_name" => NameField::SecondName,
                    other => {
                        return Err(LedgerError::Attribute(format!(
                            "Cannot filter accounts by name attribute '{}'",
                            other
                        )))
                    }
                };
                Ok((field, value.as_text(attr)?))
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        let matches = |account: &Account| {
            criteria.iter().all(|(field, wanted)| {
                let actual = match field {
                    NameField::Name => account.name(),
                    NameField::SecondName => account.second_name(),
                };
                if pattern_mode {
                    actual.contains(wanted)
                } else {
                    actual == *wanted
                }
            })
        };

        Ok(self
            .list_accounts()?
            .into_iter()
            .filter(|a| matches(a))
            .collect())
    }

    /// Filter by balance thresholds (see [`BalanceFilter`])
    pub fn filter_by_balance(
        &self,
        mode: BalanceFilter,
        criteria: &[(&str, FieldValue)],
    ) -> LedgerResult<Vec<Account>> {
        let mut card = None;
        let mut cash = None;

        for (attr, value) in criteria {
            match *attr {
                "balance_card" => card = Some(value.as_amount(attr)?),
                "balance_cash" => cash = Some(value.as_amount(attr)?),
                other => {
                    return Err(LedgerError::Attribute(format!(
                        "Cannot filter accounts by balance attribute '{}'",
                        other
                    )))
                }
            }
        }

        let accounts = self.list_accounts()?;

        if mode.total {
            let (Some(card), Some(cash)) = (card, cash) else {
                return Err(LedgerError::Attribute(
                    "Total balance filtering needs both balance_card and balance_cash".into(),
                ));
            };
            // summed wide so balances near the top of the range can't overflow
            let threshold = wide_total(cash, card);
            return Ok(accounts
                .into_iter()
                .filter(|a| {
                    compare(
                        wide_total(a.balance_cash(), a.balance_card()),
                        threshold,
                        mode.total_under,
                    )
                })
                .collect());
        }

        Ok(accounts
            .into_iter()
            .filter(|a| {
                card.map_or(true, |t| compare(a.balance_card(), t, mode.card_under))
                    && cash.map_or(true, |t| compare(a.balance_cash(), t, mode.cash_under))
            })
            .collect())
    }

    /// Filter by creation date
    ///
    /// A start date alone matches that exact day; start and end form an
    /// inclusive range. An end date without a start is rejected.
    pub fn filter_by_date(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> LedgerResult<Vec<Account>> {
        let range: Option<(NaiveDate, NaiveDate)> = match (start, end) {
            (None, Some(_)) => {
                return Err(LedgerError::Validation(
                    "A start date is required when an end date is given".into(),
                ))
            }
            (None, None) => None,
            (Some(start), None) => {
                let day = parse_date(start)?;
                Some((day, day))
            }
            (Some(start), Some(end)) => Some((parse_date(start)?, parse_date(end)?)),
        };

        let accounts = self.list_accounts()?;
        Ok(match range {
            None => accounts,
            Some((from, to)) => accounts
                .into_iter()
                .filter(|a| (from..=to).contains(&a.created_date()))
                .collect(),
        })
    }

    /// Names and kinds of the fields `update_account` accepts
    pub fn editable_fields(&self) -> Vec<FieldDescriptor> {
        Account::editable_fields()
    }

    /// Take `amount` out of one balance, refusing to go below zero
    pub(crate) fn debit(
        &self,
        id: &str,
        method: PaymentMethod,
        amount: Money,
    ) -> LedgerResult<Money> {
        self.with_account_mut(id, |account| {
            let available = account.balance(method);
            let updated = available
                .checked_sub(amount)
                .filter(|left| !left.is_negative())
                .ok_or_else(|| {
                    LedgerError::Validation(format!(
                        "Insufficient {} balance on account {}: {} available, {} required",
                        method, id, available, amount
                    ))
                })?;
            account.set_balance(method, updated)?;
            Ok(updated)
        })
    }

    /// Put `amount` back into one balance
    pub(crate) fn credit(
        &self,
        id: &str,
        method: PaymentMethod,
        amount: Money,
    ) -> LedgerResult<Money> {
        self.with_account_mut(id, |account| {
            let updated = account.balance(method).checked_add(amount).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Crediting {} to the {} balance of account {} exceeds the largest amount",
                    amount, method, id
                ))
            })?;
            account.set_balance(method, updated)?;
            Ok(updated)
        })
    }

    fn with_account_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Account) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut data = self.write()?;
        let account = data
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        f(account)
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn wide_total(cash: Money, card: Money) -> i128 {
    i128::from(cash.cents()) + i128::from(card.cents())
}

fn compare<T: Ord>(value: T, threshold: T, under: bool) -> bool {
    if under {
        value < threshold
    } else {
        value > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SequentialIds;

    fn registry() -> AccountRegistry {
        AccountRegistry::with_id_generator(SequentialIds::account_ids())
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn add(registry: &AccountRegistry, id: &str, name: &str, cash: i64, card: i64, created: &str) {
        let account = Account::new(
            AccountId::parse(id).unwrap(),
            name,
            "Tester",
            units(cash),
            units(card),
            date(created),
        )
        .unwrap();
        registry.add_account(account).unwrap();
    }

    fn ids(accounts: &[Account]) -> Vec<&str> {
        accounts.iter().map(|a| a.id().as_str()).collect()
    }

    #[test]
    fn test_create_and_get() {
        let registry = registry();
        let id = registry
            .create_account("Ann", "Lee", units(100), units(100))
            .unwrap();
        assert_eq!(id.as_str(), "0000000001");

        let account = registry.get_account(id.as_str()).unwrap();
        assert_eq!(account.name(), "Ann");
        assert_eq!(account.created_date(), Utc::now().date_naive());
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let registry = registry();
        let err = registry
            .create_account("Ann!", "Lee", units(1), units(1))
            .unwrap_err();
        assert!(err.is_validation());

        let err = registry
            .create_account("Ann", "Lee", Money::from_cents(-1), units(1))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.count().unwrap(), 0);
    }

    #[test]
    fn test_random_ids_are_ten_digits() {
        let registry = AccountRegistry::new();
        let id = registry
            .create_account("Ann", "Lee", units(1), units(1))
            .unwrap();
        assert_eq!(id.as_str().len(), 10);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_generated_ids_skip_taken_ones() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 1, 1, "2024-01-01");
        let id = registry
            .create_account("Bob", "Lee", units(1), units(1))
            .unwrap();
        assert_eq!(id.as_str(), "0000000002");
    }

    #[test]
    fn test_add_duplicate_id() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 1, 1, "2024-01-01");
        let dup = Account::new(
            AccountId::parse("0000000001").unwrap(),
            "Bob",
            "Lee",
            units(1),
            units(1),
            date("2024-01-01"),
        )
        .unwrap();
        assert!(registry.add_account(dup).unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_account_is_not_found() {
        let registry = registry();
        assert!(registry.get_account("0000000042").unwrap_err().is_not_found());
        assert!(registry.get_account("garbage").unwrap_err().is_not_found());
        assert!(registry
            .update_account("0000000042", &[("name", "Ann".into())])
            .unwrap_err()
            .is_not_found());
        assert!(registry
            .delete_account("0000000042", "2024-01-01", "Ann", "Lee")
            .unwrap_err()
            .is_not_found());
        assert!(registry
            .get_accounts(&["0000000042"])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_get_accounts_keeps_order() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 1, 1, "2024-01-01");
        add(&registry, "0000000002", "Bob", 1, 1, "2024-01-01");
        let found = registry.get_accounts(&["0000000002", "0000000001"]).unwrap();
        assert_eq!(ids(&found), vec!["0000000002", "0000000001"]);
    }

    #[test]
    fn test_update_applies_all_fields() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");

        let updated = registry
            .update_account(
                "0000000001",
                &[
                    ("name", "Anna".into()),
                    ("second_name", "Smith".into()),
                    ("balance_card", units(5).into()),
                ],
            )
            .unwrap();

        assert_eq!(updated.name(), "Anna");
        assert_eq!(updated.second_name(), "Smith");
        assert_eq!(updated.balance_card(), units(5));
        assert_eq!(registry.get_account("0000000001").unwrap(), updated);
    }

    #[test]
    fn test_failed_update_rolls_back_earlier_fields() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");
        let before = registry.get_account("0000000001").unwrap();

        let err = registry
            .update_account(
                "0000000001",
                &[
                    ("name", "Valid".into()),
                    ("balance_cash", Money::from_units(-5).into()),
                ],
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.get_account("0000000001").unwrap(), before);

        let err = registry
            .update_account(
                "0000000001",
                &[
                    ("balance_cash", Money::from_units(-5).into()),
                    ("name", "Valid".into()),
                ],
            )
            .unwrap_err();
        assert!(err.is_validation());
        let after = registry.get_account("0000000001").unwrap();
        assert_eq!(after.balance_cash(), units(100));
        assert_eq!(after.name(), "Ann");
    }

    #[test]
    fn test_update_type_and_attribute_errors() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");
        let before = registry.get_account("0000000001").unwrap();

        let err = registry
            .update_account(
                "0000000001",
                &[("name", "Bob".into()), ("balance_card", "lots".into())],
            )
            .unwrap_err();
        assert!(err.is_type());
        assert_eq!(registry.get_account("0000000001").unwrap(), before);

        let err = registry
            .update_account(
                "0000000001",
                &[("name", "Bob".into()), ("nickname", "Bobby".into())],
            )
            .unwrap_err();
        assert!(err.is_attribute());
        assert_eq!(registry.get_account("0000000001").unwrap(), before);

        let err = registry
            .update_account("0000000001", &[("created_date", "2020-01-01".into())])
            .unwrap_err();
        assert!(err.is_attribute());
    }

    #[test]
    fn test_update_id_rekeys() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");

        let updated = registry
            .update_account(
                "0000000001",
                &[("id", "1112223334".into()), ("name", "Anna".into())],
            )
            .unwrap();
        assert_eq!(updated.id().as_str(), "1112223334");
        assert!(registry.get_account("0000000001").unwrap_err().is_not_found());
        assert_eq!(registry.get_account("1112223334").unwrap().name(), "Anna");
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_update_id_collision_rolls_back() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");
        add(&registry, "0000000002", "Bob", 100, 100, "2024-01-01");

        let err = registry
            .update_account(
                "0000000001",
                &[("name", "Anna".into()), ("id", "0000000002".into())],
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.get_account("0000000001").unwrap().name(), "Ann");
        assert_eq!(registry.get_account("0000000002").unwrap().name(), "Bob");

        let err = registry
            .update_account("0000000001", &[("id", "123".into())])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(registry.contains("0000000001").unwrap());
    }

    #[test]
    fn test_delete_requires_matching_details() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");

        let err = registry
            .delete_account("0000000001", "2024-01-02", "Ann", "Tester")
            .unwrap_err();
        assert!(err.is_validation());
        let err = registry
            .delete_account("0000000001", "2024-01-01", "ann", "Tester")
            .unwrap_err();
        assert!(err.is_validation());
        assert!(registry.contains("0000000001").unwrap());

        let removed = registry
            .delete_account("0000000001", "2024-01-01", "Ann", "Tester")
            .unwrap();
        assert_eq!(removed.name(), "Ann");
        assert!(!registry.contains("0000000001").unwrap());
    }

    #[test]
    fn test_filter_by_name() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 1, 1, "2024-01-01");
        add(&registry, "0000000002", "Anna", 1, 1, "2024-01-02");
        add(&registry, "0000000003", "Bob", 1, 1, "2024-01-03");

        let exact = registry
            .filter_by_name(false, &[("name", "Ann".into())])
            .unwrap();
        assert_eq!(ids(&exact), vec!["0000000001"]);

        let pattern = registry
            .filter_by_name(true, &[("name", "Ann".into())])
            .unwrap();
        assert_eq!(ids(&pattern), vec!["0000000001", "0000000002"]);

        let both = registry
            .filter_by_name(
                true,
                &[("name", "nn".into()), ("second_name", "Test".into())],
            )
            .unwrap();
        assert_eq!(both.len(), 2);

        assert_eq!(registry.filter_by_name(false, &[]).unwrap().len(), 3);
    }

    #[test]
    fn test_filter_by_name_errors() {
        let registry = registry();
        assert!(registry
            .filter_by_name(false, &[("vendor", "x".into())])
            .unwrap_err()
            .is_attribute());
        assert!(registry
            .filter_by_name(false, &[("name", units(1).into())])
            .unwrap_err()
            .is_type());
    }

    #[test]
    fn test_filter_by_balance() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 0, 50, "2024-01-01");
        add(&registry, "0000000002", "Bob", 0, 150, "2024-01-01");

        let under = registry
            .filter_by_balance(
                BalanceFilter {
                    card_under: true,
                    ..Default::default()
                },
                &[("balance_card", units(100).into())],
            )
            .unwrap();
        assert_eq!(ids(&under), vec!["0000000001"]);

        let over = registry
            .filter_by_balance(BalanceFilter::default(), &[("balance_card", units(100).into())])
            .unwrap();
        assert_eq!(ids(&over), vec!["0000000002"]);

        // strict comparison on both sides
        let none = registry
            .filter_by_balance(BalanceFilter::default(), &[("balance_card", units(150).into())])
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_by_balance_combined_and_total() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 10, 50, "2024-01-01");
        add(&registry, "0000000002", "Bob", 200, 150, "2024-01-01");
        add(&registry, "0000000003", "Cid", 5, 500, "2024-01-01");

        let both = registry
            .filter_by_balance(
                BalanceFilter {
                    cash_under: true,
                    ..Default::default()
                },
                &[
                    ("balance_card", units(100).into()),
                    ("balance_cash", units(100).into()),
                ],
            )
            .unwrap();
        assert_eq!(ids(&both), vec!["0000000003"]);

        let total = registry
            .filter_by_balance(
                BalanceFilter {
                    total: true,
                    ..Default::default()
                },
                &[
                    ("balance_card", units(300).into()),
                    ("balance_cash", units(50).into()),
                ],
            )
            .unwrap();
        assert_eq!(ids(&total), vec!["0000000003"]);

        let total_under = registry
            .filter_by_balance(
                BalanceFilter {
                    total: true,
                    total_under: true,
                    ..Default::default()
                },
                &[
                    ("balance_card", units(300).into()),
                    ("balance_cash", units(50).into()),
                ],
            )
            .unwrap();
        assert_eq!(ids(&total_under), vec!["0000000001"]);
    }

    #[test]
    fn test_filter_by_balance_errors() {
        let registry = registry();
        let total = BalanceFilter {
            total: true,
            ..Default::default()
        };
        assert!(registry
            .filter_by_balance(total, &[("balance_card", units(1).into())])
            .unwrap_err()
            .is_attribute());
        assert!(registry
            .filter_by_balance(BalanceFilter::default(), &[("balance", units(1).into())])
            .unwrap_err()
            .is_attribute());
        assert!(registry
            .filter_by_balance(BalanceFilter::default(), &[("balance_cash", "ten".into())])
            .unwrap_err()
            .is_type());
    }

    #[test]
    fn test_filter_by_date() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 1, 1, "2024-01-01");
        add(&registry, "0000000002", "Bob", 1, 1, "2024-02-01");

        let january = registry
            .filter_by_date(Some("2024-01-01"), Some("2024-01-31"))
            .unwrap();
        assert_eq!(ids(&january), vec!["0000000001"]);

        let exact = registry.filter_by_date(Some("2024-02-01"), None).unwrap();
        assert_eq!(ids(&exact), vec!["0000000002"]);

        let inclusive = registry
            .filter_by_date(Some("2024-01-01"), Some("2024-02-01"))
            .unwrap();
        assert_eq!(inclusive.len(), 2);

        let reversed = registry
            .filter_by_date(Some("2024-02-01"), Some("2024-01-01"))
            .unwrap();
        assert!(reversed.is_empty());

        assert_eq!(registry.filter_by_date(None, None).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_by_date_errors() {
        let registry = registry();
        assert!(registry
            .filter_by_date(None, Some("2024-01-01"))
            .unwrap_err()
            .is_validation());
        assert!(registry
            .filter_by_date(Some("01/01/2024"), None)
            .unwrap_err()
            .is_validation());
        assert!(registry
            .filter_by_date(Some("2024-01-01"), Some("soon"))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_debit_and_credit() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 100, 100, "2024-01-01");

        let left = registry
            .debit("0000000001", PaymentMethod::Card, units(30))
            .unwrap();
        assert_eq!(left, units(70));

        let err = registry
            .debit("0000000001", PaymentMethod::Cash, units(101))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            registry.get_account("0000000001").unwrap().balance_cash(),
            units(100)
        );

        let back = registry
            .credit("0000000001", PaymentMethod::Card, units(30))
            .unwrap();
        assert_eq!(back, units(100));

        assert!(registry
            .debit("0000000099", PaymentMethod::Card, units(1))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_balances_never_negative() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 0, 0, "2024-01-01");
        let _ = registry.debit("0000000001", PaymentMethod::Cash, Money::from_cents(1));
        let _ = registry.update_account(
            "0000000001",
            &[("balance_card", Money::from_cents(-1).into())],
        );
        let account = registry.get_account("0000000001").unwrap();
        assert!(!account.balance_cash().is_negative());
        assert!(!account.balance_card().is_negative());
    }
    #[test]
    fn test_total_filter_near_range_limit() {
        let registry = registry();
        let max = Money::from_cents(i64::MAX);
        let account = Account::new(
            AccountId::parse("0000000001").unwrap(),
            "Ann",
            "Lee",
            Money::from_cents(1),
            max,
            date("2024-01-01"),
        )
        .unwrap();
        registry.add_account(account).unwrap();
        add(&registry, "0000000002", "Bob", 1, 1, "2024-01-01");

        let total = BalanceFilter {
            total: true,
            ..Default::default()
        };
        let over = registry
            .filter_by_balance(
                total,
                &[
                    ("balance_card", Money::from_cents(1).into()),
                    ("balance_cash", Money::from_cents(1).into()),
                ],
            )
            .unwrap();
        assert_eq!(ids(&over), vec!["0000000001", "0000000002"]);

        let under_max = registry
            .filter_by_balance(
                BalanceFilter {
                    total_under: true,
                    ..total
                },
                &[
                    ("balance_card", max.into()),
                    ("balance_cash", max.into()),
                ],
            )
            .unwrap();
        assert_eq!(ids(&under_max), vec!["0000000001", "0000000002"]);

        assert_eq!(
            registry.get_account("0000000001").unwrap().total_balance(),
            max
        );
    }

    #[test]
    fn test_credit_past_range_limit_is_rejected() {
        let registry = registry();
        add(&registry, "0000000001", "Ann", 0, 0, "2024-01-01");
        let max = Money::from_cents(i64::MAX);
        registry
            .update_account("0000000001", &[("balance_card", max.into())])
            .unwrap();

        let err = registry
            .credit("0000000001", PaymentMethod::Card, Money::from_cents(1))
            .unwrap_err();
        assert!(err.is_validation());

        let account = registry.get_account("0000000001").unwrap();
        assert_eq!(account.balance_card(), max);
        assert_eq!(
            registry
                .credit("0000000001", PaymentMethod::Cash, Money::from_cents(1))
                .unwrap(),
            Money::from_cents(1)
        );
    }
}
