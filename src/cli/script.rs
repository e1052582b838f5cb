//! Script runner
//!
//! Executes ledger commands one line at a time against a single in-memory
//! book. Lines are split like a shell would (quotes group words) and parsed
//! with clap. A failing line prints `error: <message>` and the run carries on
//! with the next one, unless it is strict.

use std::io::BufRead;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use super::account::{handle_account_command, AccountCommands};
use super::transaction::{handle_transaction_command, TransactionCommands};
use crate::error::{LedgerError, LedgerResult};
use crate::services::Book;

/// One script line
#[derive(Parser, Debug)]
#[command(name = "fundbook", no_binary_name = true, disable_version_flag = true)]
struct ScriptLine {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Subcommand, Debug)]
enum ScriptCommand {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Print the editable fields of each entity as JSON
    Fields,
}

#[derive(Debug, Error)]
enum LineError {
    #[error("{0}")]
    Split(#[from] shell_words::ParseError),

    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl LineError {
    /// Single-line message without clap's `error:` prefix and usage trailer
    fn message(&self) -> String {
        match self {
            Self::Usage(err) => {
                let rendered = err.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                first.strip_prefix("error: ").unwrap_or(first).to_string()
            }
            other => other.to_string(),
        }
    }
}

/// What a script run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Command lines run, successful or not
    pub executed: usize,
    pub failed: usize,
    /// 1-based line number of the failure that ended a strict run
    pub stopped_at: Option<usize>,
}

/// Run every command in `input` against `book`
pub fn run_script(book: &Book, input: impl BufRead, strict: bool) -> LedgerResult<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        summary.executed += 1;
        debug!(line = index + 1, command = trimmed, "Running script line");

        match execute_line(book, trimmed) {
            Ok(()) => {}
            Err(LineError::Usage(err))
                if matches!(
                    err.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                print!("{}", err);
            }
            Err(err) => {
                summary.failed += 1;
                println!("error: {}", err.message());
                if strict {
                    summary.stopped_at = Some(index + 1);
                    break;
                }
            }
        }
    }

    Ok(summary)
}

fn execute_line(book: &Book, line: &str) -> Result<(), LineError> {
    let words = shell_words::split(line)?;
    let parsed = ScriptLine::try_parse_from(words)?;

    match parsed.command {
        ScriptCommand::Account(cmd) => handle_account_command(book, cmd)?,
        ScriptCommand::Txn(cmd) => handle_transaction_command(book, cmd)?,
        ScriptCommand::Fields => {
            let json = serde_json::to_string_pretty(&book.attribute_directory())
                .map_err(LedgerError::from)?;
            println!("{}", json);
        }
    }

    Ok(())
}
