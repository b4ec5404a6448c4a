//! Ledger CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::ledger::{format_ledger_list, format_ledger_summary};
use crate::error::{ClearSpendError, ClearSpendResult};
use crate::services::ledger::parse_month;
use crate::services::LedgerService;
use crate::storage::LedgerStore;

/// Ledger subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// List month ledgers, newest first
    List,

    /// Show a monthly summary
    Summary {
        /// Month to summarize (YYYY-MM, default current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a ledger command
pub fn handle_ledger_command<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    cmd: LedgerCommands,
) -> ClearSpendResult<()> {
    run_ledger_command(store, settings, cmd, Local::now().date_naive())
}

fn run_ledger_command<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    cmd: LedgerCommands,
    today: NaiveDate,
) -> ClearSpendResult<()> {
    let service = LedgerService::new(store);

    match cmd {
        LedgerCommands::List => {
            let ledgers = service.list()?;
            print!("{}", format_ledger_list(&ledgers));
        }

        LedgerCommands::Summary { month } => {
            let ledger = match month {
                Some(text) => {
                    let (year, month) = parse_month(&text)?;
                    service
                        .find(year, month)?
                        .ok_or_else(|| ClearSpendError::ledger_not_found(&text))?
                }
                None => service.current(today)?,
            };

            let summary = service.summary(&ledger, today)?;
            print!(
                "{}",
                format_ledger_summary(&summary, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
