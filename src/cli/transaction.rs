//! Transaction script commands

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::LedgerResult;
use crate::models::{CreateTransactionInput, FieldKind, FieldValue, PaymentMethod};
use crate::services::Book;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a purchase and debit the account
    Add {
        /// Account ID
        account: String,
        /// Total cost (e.g., "30" or "29.99")
        cost: String,
        /// CARD or CASH
        method: String,
        /// Item bought
        item: String,
        /// How many
        quantity: u32,
        /// Item category (one of the loaded categories)
        category: String,
        /// Where it was bought
        vendor: String,
    },
    /// List an account's transactions
    List {
        /// Account ID
        account: String,
    },
    /// Show one transaction
    Show {
        /// Account ID
        account: String,
        /// Transaction ID
        transaction: String,
    },
    /// Reverse a transaction, crediting its cost back
    Reverse {
        /// Account ID
        account: String,
        /// Transaction ID
        transaction: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(book: &Book, cmd: TransactionCommands) -> LedgerResult<()> {
    let ledger = book.transactions();

    match cmd {
        TransactionCommands::Add {
            account,
            cost,
            method,
            item,
            quantity,
            category,
            vendor,
        } => {
            let input = CreateTransactionInput {
                user_id: account,
                cost: FieldValue::parse_as(FieldKind::Amount, "cost", &cost)?.as_amount("cost")?,
                payment_method: PaymentMethod::parse(&method)?,
                item,
                quantity,
                item_category: category,
                vendor,
            };
            let id = ledger.create_transaction(&input)?;
            println!("Recorded transaction: {}", id);
        }

        TransactionCommands::List { account } => {
            print!(
                "{}",
                format_transaction_register(&ledger.get_user_transactions(&account)?)
            );
        }

        TransactionCommands::Show {
            account,
            transaction,
        } => match ledger.get_user_transaction(&account, &transaction)? {
            Some(txn) => print!("{}", format_transaction_details(&txn)),
            None => println!(
                "No transaction {} on account {}.",
                transaction, account
            ),
        },

        TransactionCommands::Reverse {
            account,
            transaction,
        } => match ledger.reverse_transaction(&account, &transaction)? {
            Some(txn) => println!("Reversed transaction: {} ({})", txn.id(), txn.cost()),
            None => println!(
                "Nothing reversed: no transaction {} on account {}.",
                transaction, account
            ),
        },
    }

    Ok(())
}
