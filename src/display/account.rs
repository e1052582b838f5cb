//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};
use crate::validation::DATE_FORMAT;

/// Format a list of accounts as a table with a totals row
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name().chars().count() + a.second_name().chars().count() + 1)
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:>12}  {:>12}  {:<10}\n",
        "ID",
        "Name",
        "Cash",
        "Card",
        "Created",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width));

    for account in accounts {
        let full_name = format!("{} {}", account.name(), account.second_name());
        output.push_str(&format!(
            "{:<10}  {:<name_width$}  {:>12}  {:>12}  {:<10}\n",
            account.id(),
            full_name,
            account.balance_cash().to_string(),
            account.balance_card().to_string(),
            account.created_date().format(DATE_FORMAT).to_string(),
            name_width = name_width,
        ));
    }

    let total_cash: Money = accounts.iter().map(Account::balance_cash).sum();
    let total_card: Money = accounts.iter().map(Account::balance_card).sum();

    output.push_str(&separator(name_width));
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:>12}  {:>12}\n",
        "TOTAL",
        "",
        total_cash.to_string(),
        total_card.to_string(),
        name_width = name_width,
    ));

    output
}

fn separator(name_width: usize) -> String {
    format!(
        "{:-<10}  {:-<name_width$}  {:->12}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    )
}

/// Format a single account's details
pub fn format_account_details(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Account: {} {}\n",
        account.name(),
        account.second_name()
    ));
    output.push_str(&format!("  ID:           {}\n", account.id()));
    output.push_str(&format!("  Cash Balance: {}\n", account.balance_cash()));
    output.push_str(&format!("  Card Balance: {}\n", account.balance_card()));
    output.push_str(&format!("  Total:        {}\n", account.total_balance()));
    output.push_str(&format!(
        "  Created:      {}\n",
        account.created_date().format(DATE_FORMAT)
    ));

    output
}
