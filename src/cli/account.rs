//! Account script commands
//!
//! Field updates and filters take `field=value` pairs. Values are converted by
//! the field's kind from the account field table, so `balance_cash=abc` is a
//! type error while `nickname=Bob` reaches the registry and is rejected there
//! as an unknown attribute.

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, FieldKind, FieldValue, Money};
use crate::services::{BalanceFilter, Book};

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create a new account dated today
    Create {
        /// First name (letters only)
        name: String,
        /// Second name (letters only)
        second_name: String,
        /// Starting cash balance (e.g., "100" or "100.50")
        #[arg(long, default_value = "0")]
        cash: String,
        /// Starting card balance
        #[arg(long, default_value = "0")]
        card: String,
    },
    /// Show account details
    Show {
        /// Account ID
        id: String,
    },
    /// List all accounts
    List,
    /// Update one or more fields as a unit
    Update {
        /// Account ID
        id: String,
        /// Changes as field=value (id, name, second_name, balance_cash, balance_card)
        #[arg(required = true)]
        changes: Vec<String>,
    },
    /// Delete an account after confirming its details
    Delete {
        /// Account ID
        id: String,
        /// Creation date (YYYY-MM-DD)
        #[arg(long)]
        created: String,
        /// First name as stored
        #[arg(long)]
        name: String,
        /// Second name as stored
        #[arg(long)]
        second_name: String,
    },
    /// Find accounts by name and/or second name
    FindName {
        /// Match substrings instead of whole names
        #[arg(long)]
        pattern: bool,
        /// Criteria as field=value (name, second_name)
        criteria: Vec<String>,
    },
    /// Find accounts by balance thresholds
    FindBalance {
        /// Compare the summed criteria against cash + card
        #[arg(long)]
        total: bool,
        /// With --total, match totals below the threshold
        #[arg(long)]
        total_under: bool,
        /// Match cash balances below the threshold
        #[arg(long)]
        cash_under: bool,
        /// Match card balances below the threshold
        #[arg(long)]
        card_under: bool,
        /// Criteria as field=value (balance_cash, balance_card)
        criteria: Vec<String>,
    },
    /// Find accounts by creation date
    FindDate {
        /// Exact day, or range start when --end is given (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Inclusive range end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(book: &Book, cmd: AccountCommands) -> LedgerResult<()> {
    let accounts = book.accounts();

    match cmd {
        AccountCommands::Create {
            name,
            second_name,
            cash,
            card,
        } => {
            let cash = parse_amount("balance_cash", &cash)?;
            let card = parse_amount("balance_card", &card)?;
            let id = accounts.create_account(&name, &second_name, cash, card)?;
            println!("Created account: {}", id);
        }

        AccountCommands::Show { id } => {
            print!("{}", format_account_details(&accounts.get_account(&id)?));
        }

        AccountCommands::List => {
            print!("{}", format_account_list(&accounts.list_accounts()?));
        }

        AccountCommands::Update { id, changes } => {
            let changes = parse_assignments(&changes)?;
            let updated = book.update_account(&id, &borrowed(&changes))?;
            println!("Updated account: {}", updated);
        }

        AccountCommands::Delete {
            id,
            created,
            name,
            second_name,
        } => {
            let removed = book.delete_account(&id, &created, &name, &second_name)?;
            println!("Deleted account: {}", removed);
        }

        AccountCommands::FindName { pattern, criteria } => {
            let criteria = parse_assignments(&criteria)?;
            let found = accounts.filter_by_name(pattern, &borrowed(&criteria))?;
            print!("{}", format_account_list(&found));
        }

        AccountCommands::FindBalance {
            total,
            total_under,
            cash_under,
            card_under,
            criteria,
        } => {
            let mode = BalanceFilter {
                total,
                total_under,
                cash_under,
                card_under,
            };
            let criteria = parse_assignments(&criteria)?;
            let found = accounts.filter_by_balance(mode, &borrowed(&criteria))?;
            print!("{}", format_account_list(&found));
        }

        AccountCommands::FindDate { start, end } => {
            let found = accounts.filter_by_date(start.as_deref(), end.as_deref())?;
            print!("{}", format_account_list(&found));
        }
    }

    Ok(())
}

fn parse_amount(field: &str, raw: &str) -> LedgerResult<Money> {
    FieldValue::parse_as(FieldKind::Amount, field, raw)?.as_amount(field)
}

/// Split `field=value` arguments, converting each value by its field's kind
pub(crate) fn parse_assignments(args: &[String]) -> LedgerResult<Vec<(String, FieldValue)>> {
    let fields = Account::editable_fields();

    args.iter()
        .map(|arg| {
            let (name, raw) = arg.split_once('=').ok_or_else(|| {
                LedgerError::Validation(format!("Expected field=value, got '{}'", arg))
            })?;
            let kind = fields
                .iter()
                .find(|f| f.name == name)
                .map_or(FieldKind::Text, |f| f.kind);
            Ok((name.to_string(), FieldValue::parse_as(kind, name, raw)?))
        })
        .collect()
}

fn borrowed(pairs: &[(String, FieldValue)]) -> Vec<(&str, FieldValue)> {
    pairs
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect()
}
