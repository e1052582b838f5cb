//! Field validators
//!
//! Pure predicate and assertion functions used by the entity setters. None of
//! these hold state; each assertion returns a `Validation` error naming the
//! constraint that was violated.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Date format used for every date the ledger accepts or prints
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a name or second name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Length of an account id
pub const ACCOUNT_ID_LEN: usize = 10;

/// Length of a transaction id
pub const TRANSACTION_ID_LEN: usize = 20;

/// Check if a string contains any numeric characters
///
/// Any Unicode numeric counts, so `Ⅻ` and `½` do as well as ASCII digits.
pub fn string_has_numbers(input: &str) -> bool {
    input.chars().any(char::is_numeric)
}

/// Check if a string contains anything that is not a letter or a digit
///
/// Whitespace and punctuation both count as special characters.
pub fn string_has_special_characters(input: &str) -> bool {
    input.chars().any(|c| !c.is_alphanumeric())
}

/// Validate a name or second name
pub fn validate_name(input: &str) -> LedgerResult<()> {
    let len = input.chars().count();
    if !(1..=MAX_NAME_LEN).contains(&len) {
        return Err(LedgerError::Validation(format!(
            "Name or second name length should be between 1 and {} characters, got {}",
            MAX_NAME_LEN, len
        )));
    }
    if string_has_numbers(input) {
        return Err(LedgerError::Validation(
            "Name or second name should contain only alphabet characters, no numbers are allowed"
                .into(),
        ));
    }
    if string_has_special_characters(input) {
        return Err(LedgerError::Validation(
            "Name or second name should not contain special characters like: !,$,@ or spaces"
                .into(),
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date, rejecting anything else
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid date '{}'. Date should be in the format 'YYYY-MM-DD'",
            input
        ))
    })
}

/// Balances may be zero but never negative
pub fn validate_balance(balance: Money) -> LedgerResult<()> {
    if balance.is_negative() {
        return Err(LedgerError::Validation(format!(
            "Balance cannot be less than 0, got {}",
            balance
        )));
    }
    Ok(())
}

/// Costs must be strictly positive
pub fn validate_positive_amount(field: &str, amount: Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::Validation(format!(
            "{} should be greater than 0, got {}",
            field, amount
        )));
    }
    Ok(())
}

pub fn validate_quantity(quantity: u32) -> LedgerResult<()> {
    if quantity == 0 {
        return Err(LedgerError::Validation(
            "Quantity should be a positive whole number".into(),
        ));
    }
    Ok(())
}

/// Reject empty or whitespace-only text
pub fn validate_non_empty(field: &str, input: &str) -> LedgerResult<()> {
    if input.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// An account id is exactly ten ASCII digits
pub fn validate_account_id(input: &str) -> LedgerResult<()> {
    if input.len() != ACCOUNT_ID_LEN || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::Validation(format!(
            "ID should be {} digits long, got '{}'",
            ACCOUNT_ID_LEN, input
        )));
    }
    Ok(())
}

/// A transaction id is exactly twenty ASCII letters or digits
pub fn validate_transaction_id(input: &str) -> LedgerResult<()> {
    if input.len() != TRANSACTION_ID_LEN || !input.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(LedgerError::Validation(format!(
            "Transaction ID should be {} alphanumeric characters, got '{}'",
            TRANSACTION_ID_LEN, input
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_classification() {
        assert!(string_has_numbers("abc1"));
        assert!(!string_has_numbers("abc"));
        assert!(string_has_numbers("LouisⅫ"));
        assert!(string_has_numbers("Ann½"));
        assert!(!string_has_numbers("Zoë"));
        assert!(string_has_special_characters("Hello!"));
        assert!(string_has_special_characters("Hello World"));
        assert!(!string_has_special_characters("Hello"));
        assert!(string_has_special_characters("Hello@#$@#"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ann").is_ok());
        assert!(validate_name("Zoë").is_ok());
        assert!(validate_name(&"a".repeat(100)).is_ok());

        assert!(validate_name("").unwrap_err().is_validation());
        assert!(validate_name(&"a".repeat(101)).unwrap_err().is_validation());
        assert!(validate_name("Ann2").unwrap_err().is_validation());
        assert!(validate_name("Ann-Marie").unwrap_err().is_validation());
        assert!(validate_name("Ann Lee").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("31-01-2024").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(validate_balance(Money::zero()).is_ok());
        assert!(validate_balance(Money::from_cents(-1)).is_err());
        assert!(validate_positive_amount("Cost", Money::from_cents(1)).is_ok());
        assert!(validate_positive_amount("Cost", Money::zero()).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_id_shapes() {
        assert!(validate_account_id("0123456789").is_ok());
        assert!(validate_account_id("012345678").is_err());
        assert!(validate_account_id("01234567a9").is_err());
        assert!(validate_transaction_id("abcdef0123456789ABCD").is_ok());
        assert!(validate_transaction_id("abcdef0123456789ABC").is_err());
        assert!(validate_transaction_id("abcdef0123456789ABC-").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert!(validate_non_empty("Item", "book").is_ok());
        assert!(validate_non_empty("Item", "   ").is_err());
    }
}
