//! Strongly-typed id wrappers and id generators
//!
//! Account ids are ten ASCII digits, transaction ids twenty ASCII
//! alphanumerics. Both are validated on every construction path, including
//! deserialization. Fresh ids come from an [`IdGenerator`] injected into the
//! registry and ledger, so tests can use deterministic counters.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::validation::{
    validate_account_id, validate_transaction_id, ACCOUNT_ID_LEN, TRANSACTION_ID_LEN,
};

/// Macro to generate validated string id newtypes
macro_rules! define_id {
    ($name:ident, $validate:path) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an id, checking its shape
            pub fn parse(s: &str) -> LedgerResult<Self> {
                $validate(s)?;
                Ok(Self(s.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        // Lets id-keyed maps be queried with a plain &str
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = LedgerError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                $validate(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(AccountId, validate_account_id);
define_id!(TransactionId, validate_transaction_id);

/// Source of fresh id strings
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random fixed-width decimal ids, drawn from a v4 UUID
#[derive(Debug, Clone)]
pub struct RandomDigits {
    len: usize,
}

impl RandomDigits {
    /// `len` is capped at 38 digits, the width of a u128
    pub fn new(len: usize) -> Self {
        Self { len: len.clamp(1, 38) }
    }

    pub fn account_ids() -> Self {
        Self::new(ACCOUNT_ID_LEN)
    }
}

impl IdGenerator for RandomDigits {
    fn next_id(&mut self) -> String {
        let modulus = 10u128.pow(self.len as u32);
        let value = Uuid::new_v4().as_u128() % modulus;
        format!("{:0width$}", value, width = self.len)
    }
}

/// Random fixed-width lowercase hex ids
#[derive(Debug, Clone)]
pub struct RandomHex {
    len: usize,
}

impl RandomHex {
    /// `len` is capped at 32, the length of a simple UUID
    pub fn new(len: usize) -> Self {
        Self { len: len.clamp(1, 32) }
    }

    pub fn transaction_ids() -> Self {
        Self::new(TRANSACTION_ID_LEN)
    }
}

impl IdGenerator for RandomHex {
    fn next_id(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(self.len);
        id
    }
}

/// Deterministic zero-padded counter, starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
    width: usize,
}

impl SequentialIds {
    pub fn new(width: usize) -> Self {
        Self { next: 1, width }
    }

    pub fn account_ids() -> Self {
        Self::new(ACCOUNT_ID_LEN)
    }

    pub fn transaction_ids() -> Self {
        Self::new(TRANSACTION_ID_LEN)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{:0width$}", self.next, width = self.width);
        self.next += 1;
        id
    }
}
