//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod exchange;
pub mod expense;
pub mod ledger;
pub mod scan;

pub use category::{handle_category_command, CategoryCommands};
pub use exchange::{handle_export_command, handle_import_command, ExportTarget};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use scan::{handle_scan_command, ScanArgs};
