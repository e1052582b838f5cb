//! Item categories
//!
//! The set of category names a transaction may be filed under. It is loaded
//! once at start-up (see `config::categories`) and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{LedgerError, LedgerResult};

/// Permitted item categories, matched exactly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn validate(&self, name: &str) -> LedgerResult<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(LedgerError::Validation(format!(
                "Unknown item category '{}'",
                name
            )))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
