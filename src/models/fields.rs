//! Field directory
//!
//! Describes the caller-editable fields of each entity by name and kind so a
//! front-end can build forms without knowing the validation rules, and gives
//! dynamic updates and filters a typed value to carry.

use serde::Serialize;
use std::fmt;

use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Accepted value shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free or constrained text
    Text,
    /// A monetary amount
    Amount,
    /// A positive whole number
    Integer,
    /// One value out of a fixed set
    Choice,
    /// An entity id
    Identifier,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Amount => write!(f, "amount"),
            Self::Integer => write!(f, "integer"),
            Self::Choice => write!(f, "choice"),
            Self::Identifier => write!(f, "identifier"),
        }
    }
}

/// Name and kind of one editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// A value supplied for a named field in an update or filter
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(Money),
}

impl FieldValue {
    /// Convert raw user input according to the field's kind
    ///
    /// Amount fields must parse as a number; anything else is kept as text and
    /// left to the field's own validator.
    pub fn parse_as(kind: FieldKind, field: &str, raw: &str) -> LedgerResult<Self> {
        match kind {
            FieldKind::Amount => Money::parse(raw).map(Self::Amount).map_err(|_| {
                LedgerError::Type(format!(
                    "{} expects a number, '{}' was given",
                    field, raw
                ))
            }),
            _ => Ok(Self::Text(raw.to_string())),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Amount(_) => "amount",
        }
    }

    /// Borrow the text, or fail with a type error naming `field`
    pub fn as_text(&self, field: &str) -> LedgerResult<&str> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(LedgerError::Type(format!(
                "{} expects text, input of type {} was given",
                field,
                other.type_name()
            ))),
        }
    }

    /// Get the amount, or fail with a type error naming `field`
    pub fn as_amount(&self, field: &str) -> LedgerResult<Money> {
        match self {
            Self::Amount(m) => Ok(*m),
            other => Err(LedgerError::Type(format!(
                "{} expects a number, input of type {} was given",
                field,
                other.type_name()
            ))),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Money> for FieldValue {
    fn from(m: Money) -> Self {
        Self::Amount(m)
    }
}
