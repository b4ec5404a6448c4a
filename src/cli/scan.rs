//! Receipt scan command
//!
//! Reads OCR'd receipt text, shows what was found, and optionally saves it
//! as an expense.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::settings::Settings;
use crate::display::expense::format_expense_details;
use crate::display::receipt::format_receipt_fields;
use crate::error::{ClearSpendError, ClearSpendResult};
use crate::receipt;
use crate::services::ExpenseService;
use crate::storage::LedgerStore;

use super::expense::classification;

/// Arguments for `scan`
#[derive(Args)]
pub struct ScanArgs {
    /// Text file with the receipt's OCR output ("-" for stdin)
    pub file: PathBuf,

    /// Save the receipt as an expense
    #[arg(long)]
    pub save: bool,

    /// Sub-category for the saved expense
    #[arg(long, requires = "save")]
    pub sub_category: Option<String>,

    /// Payment method for the saved expense
    #[arg(long, requires = "save")]
    pub payment_method: Option<String>,
}

/// Handle the scan command
pub fn handle_scan_command<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    args: ScanArgs,
) -> ClearSpendResult<()> {
    let text = read_receipt_text(&args.file)?;
    run_scan(store, settings, &text, args, Local::now().date_naive())
}

fn run_scan<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    text: &str,
    args: ScanArgs,
    today: NaiveDate,
) -> ClearSpendResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let fields = receipt::extract(text);
    print!("{}", format_receipt_fields(&fields, symbol));

    if !args.save {
        return Ok(());
    }

    let service = ExpenseService::new(store);
    let mut draft = service.draft_from_receipt(&fields, today)?;
    draft.payment_method = args
        .payment_method
        .unwrap_or_else(|| settings.scan_payment_method.clone());
    draft.sub_category = args.sub_category;

    let expense = service.create(draft)?;
    println!();
    println!("Saved expense: {}", expense.id);
    print!(
        "{}",
        format_expense_details(&expense, classification(store, &expense)?.as_deref(), symbol)
    );

    Ok(())
}

fn read_receipt_text(path: &Path) -> ClearSpendResult<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| ClearSpendError::Io(format!("Failed to read stdin: {}", e)))?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .map_err(|e| ClearSpendError::Io(format!("Failed to read {}: {}", path.display(), e)))
}
