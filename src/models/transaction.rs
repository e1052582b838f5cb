//! Transaction model
//!
//! A transaction is a single debit against one account's cash or card
//! balance. It is validated in full at construction and never edited
//! afterwards; the only way to undo it is a reversal through the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategorySet;
use super::fields::{FieldDescriptor, FieldKind};
use super::ids::{AccountId, TransactionId};
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};
use crate::validation::{validate_non_empty, validate_positive_amount, validate_quantity};

/// Which balance a transaction draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    /// Parse a payment method, ignoring case
    pub fn parse(s: &str) -> LedgerResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            _ => Err(LedgerError::Validation(format!(
                "Invalid payment method '{}'. Valid methods: CARD, CASH",
                s
            ))),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "CARD"),
            Self::Cash => write!(f, "CASH"),
        }
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub user_id: String,
    pub cost: Money,
    pub payment_method: PaymentMethod,
    pub item: String,
    pub quantity: u32,
    pub item_category: String,
    pub vendor: String,
}

/// A recorded debit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    user_id: AccountId,
    cost: Money,
    payment_method: PaymentMethod,
    item: String,
    quantity: u32,
    item_category: String,
    vendor: String,
    transaction_date: NaiveDate,
}

impl Transaction {
    /// Build a validated transaction
    pub fn new(
        id: TransactionId,
        user_id: AccountId,
        input: &CreateTransactionInput,
        categories: &CategorySet,
        transaction_date: NaiveDate,
    ) -> LedgerResult<Self> {
        validate_positive_amount("Cost", input.cost)?;
        validate_non_empty("Item", &input.item)?;
        validate_quantity(input.quantity)?;
        categories.validate(&input.item_category)?;
        validate_non_empty("Vendor", &input.vendor)?;

        Ok(Self {
            id,
            user_id,
            cost: input.cost,
            payment_method: input.payment_method,
            item: input.item.clone(),
            quantity: input.quantity,
            item_category: input.item_category.clone(),
            vendor: input.vendor.clone(),
            transaction_date,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn user_id(&self) -> &AccountId {
        &self.user_id
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn item_category(&self) -> &str {
        &self.item_category
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }

    /// Moves the transaction to another owner after an account re-key
    pub(crate) fn reassign(&mut self, user_id: AccountId) {
        self.user_id = user_id;
    }

    /// Names and kinds of the fields a caller supplies when recording one
    pub fn input_fields() -> Vec<FieldDescriptor> {
        TRANSACTION_FIELDS.to_vec()
    }
}

const TRANSACTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "cost",
        kind: FieldKind::Amount,
    },
    FieldDescriptor {
        name: "payment_method",
        kind: FieldKind::Choice,
    },
    FieldDescriptor {
        name: "item",
        kind: FieldKind::Text,
    },
    FieldDescriptor {
        name: "quantity",
        kind: FieldKind::Integer,
    },
    FieldDescriptor {
        name: "item_category",
        kind: FieldKind::Choice,
    },
    FieldDescriptor {
        name: "vendor",
        kind: FieldKind::Text,
    },
];

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} x{} @ {} {} {}",
            self.transaction_date.format("%Y-%m-%d"),
            self.item,
            self.quantity,
            self.vendor,
            self.cost,
            self.payment_method
        )
    }
}
