//! Transaction display formatting

use crate::models::Transaction;
use crate::validation::DATE_FORMAT;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction) -> String {
    format!(
        "{:<20}  {:<10}  {:<20}  {:>4}  {:<12}  {:<16}  {:<4}  {:>12}",
        txn.id(),
        txn.transaction_date().format(DATE_FORMAT),
        truncate(txn.item(), 20),
        txn.quantity(),
        truncate(txn.item_category(), 12),
        truncate(txn.vendor(), 16),
        txn.payment_method(),
        txn.cost().to_string()
    )
}

/// Format an account's transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20}  {:<10}  {:<20}  {:>4}  {:<12}  {:<16}  {:<4}  {:>12}\n",
        "ID", "Date", "Item", "Qty", "Category", "Vendor", "Paid", "Cost"
    ));
    output.push_str(&"-".repeat(114));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!("Account:     {}\n", txn.user_id()));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.transaction_date().format(DATE_FORMAT)
    ));
    output.push_str(&format!("Item:        {} x{}\n", txn.item(), txn.quantity()));
    output.push_str(&format!("Category:    {}\n", txn.item_category()));
    output.push_str(&format!("Vendor:      {}\n", txn.vendor()));
    output.push_str(&format!("Paid by:     {}\n", txn.payment_method()));
    output.push_str(&format!("Cost:        {}\n", txn.cost()));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
