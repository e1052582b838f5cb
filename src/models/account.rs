//! Account model
//!
//! An account holds two balances, cash and card, and the holder's names. All
//! fields are private and every setter runs the field's validator first, so an
//! `Account` value is valid by construction.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::fields::{FieldDescriptor, FieldKind, FieldValue};
use super::ids::AccountId;
use super::money::Money;
use super::transaction::PaymentMethod;
use crate::error::LedgerResult;
use crate::validation::{validate_balance, validate_name, DATE_FORMAT};

/// A ledger holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    name: String,
    second_name: String,
    balance_cash: Money,
    balance_card: Money,
    created_date: NaiveDate,
}

impl Account {
    /// Create a validated account
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        second_name: impl Into<String>,
        balance_cash: Money,
        balance_card: Money,
        created_date: NaiveDate,
    ) -> LedgerResult<Self> {
        let name = name.into();
        let second_name = second_name.into();
        Self::validate_fields(&name, &second_name, balance_cash, balance_card)?;

        Ok(Self {
            id,
            name,
            second_name,
            balance_cash,
            balance_card,
            created_date,
        })
    }

    /// Run every field validator without building anything
    pub(crate) fn validate_fields(
        name: &str,
        second_name: &str,
        balance_cash: Money,
        balance_card: Money,
    ) -> LedgerResult<()> {
        validate_name(name)?;
        validate_name(second_name)?;
        validate_balance(balance_cash)?;
        validate_balance(balance_card)
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn second_name(&self) -> &str {
        &self.second_name
    }

    pub fn balance_cash(&self) -> Money {
        self.balance_cash
    }

    pub fn balance_card(&self) -> Money {
        self.balance_card
    }

    /// The balance a payment method draws from
    pub fn balance(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Card => self.balance_card,
            PaymentMethod::Cash => self.balance_cash,
        }
    }

    /// Cash plus card, clamped at the largest representable amount
    pub fn total_balance(&self) -> Money {
        self.balance_cash.saturating_add(self.balance_card)
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn set_id(&mut self, id: AccountId) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: &str) -> LedgerResult<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_second_name(&mut self, second_name: &str) -> LedgerResult<()> {
        validate_name(second_name)?;
        self.second_name = second_name.to_string();
        Ok(())
    }

    pub fn set_balance_cash(&mut self, balance: Money) -> LedgerResult<()> {
        validate_balance(balance)?;
        self.balance_cash = balance;
        Ok(())
    }

    pub fn set_balance_card(&mut self, balance: Money) -> LedgerResult<()> {
        validate_balance(balance)?;
        self.balance_card = balance;
        Ok(())
    }

    pub fn set_balance(&mut self, method: PaymentMethod, balance: Money) -> LedgerResult<()> {
        match method {
            PaymentMethod::Card => self.set_balance_card(balance),
            PaymentMethod::Cash => self.set_balance_cash(balance),
        }
    }

    /// Put every editable field back to the snapshot's value
    ///
    /// Goes through the same setters as an update, so the restored state is
    /// validated exactly like any other.
    pub(crate) fn restore(&mut self, snapshot: &Account) -> LedgerResult<()> {
        self.set_id(snapshot.id.clone());
        self.set_name(&snapshot.name)?;
        self.set_second_name(&snapshot.second_name)?;
        self.set_balance_cash(snapshot.balance_cash)?;
        self.set_balance_card(snapshot.balance_card)?;
        Ok(())
    }

    /// Names and kinds of the fields an update may touch
    pub fn editable_fields() -> Vec<FieldDescriptor> {
        ACCOUNT_FIELDS.iter().map(AccountField::descriptor).collect()
    }

    /// Look up the setter for a field name
    pub(crate) fn field(name: &str) -> Option<&'static AccountField> {
        ACCOUNT_FIELDS.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.second_name, self.id)
    }
}

/// One row of the account field table: a name, its kind and a typed setter
pub(crate) struct AccountField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub apply: fn(&mut Account, &FieldValue) -> LedgerResult<()>,
}

impl AccountField {
    pub fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            kind: self.kind,
        }
    }
}

fn apply_id(account: &mut Account, value: &FieldValue) -> LedgerResult<()> {
    let id = AccountId::parse(value.as_text("id")?)?;
    account.set_id(id);
    Ok(())
}

fn apply_name(account: &mut Account, value: &FieldValue) -> LedgerResult<()> {
    account.set_name(value.as_text("name")?)
}

fn apply_second_name(account: &mut Account, value: &FieldValue) -> LedgerResult<()> {
    account.set_second_name(value.as_text("second_name")?)
}

fn apply_balance_cash(account: &mut Account, value: &FieldValue) -> LedgerResult<()> {
    account.set_balance_cash(value.as_amount("balance_cash")?)
}

fn apply_balance_card(account: &mut Account, value: &FieldValue) -> LedgerResult<()> {
    account.set_balance_card(value.as_amount("balance_card")?)
}

static ACCOUNT_FIELDS: &[AccountField] = &[
    AccountField {
        name: "id",
        kind: FieldKind::Identifier,
        apply: apply_id,
    },
    AccountField {
        name: "name",
        kind: FieldKind::Text,
        apply: apply_name,
    },
    AccountField {
        name: "second_name",
        kind: FieldKind::Text,
        apply: apply_second_name,
    },
    AccountField {
        name: "balance_cash",
        kind: FieldKind::Amount,
        apply: apply_balance_cash,
    },
    AccountField {
        name: "balance_card",
        kind: FieldKind::Amount,
        apply: apply_balance_card,
    },
];

/// Details a caller must repeat back before an account is deleted
///
/// This is a confirmation step against accidental deletion, not an
/// authorization check.
#[derive(Debug, Clone, Copy)]
pub struct DeletionConfirmation<'a> {
    pub created_date: &'a str,
    pub name: &'a str,
    pub second_name: &'a str,
}

impl DeletionConfirmation<'_> {
    pub fn matches(&self, account: &Account) -> bool {
        self.created_date == account.created_date.format(DATE_FORMAT).to_string()
            && self.name == account.name
            && self.second_name == account.second_name
    }
}
