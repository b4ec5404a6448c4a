use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use clearspend::cli::{
    handle_category_command, handle_expense_command, handle_export_command,
    handle_import_command, handle_ledger_command, handle_scan_command,
};
use clearspend::config::{paths::ClearSpendPaths, settings::Settings};
use clearspend::storage::Storage;

#[derive(Parser)]
#[command(
    name = "clearspend",
    version,
    about = "Personal expense tracking from the command line",
    long_about = "ClearSpend keeps your expenses in monthly ledgers, sorts them into \
                  categories, moves them between installations as CSV, and turns \
                  receipt text into expenses."
)]
struct Cli {
    /// Data directory (default: the platform config directory)
    #[arg(long, global = true, env = "CLEARSPEND_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default categories
    Init,

    /// Import expenses from a CSV export
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Export every expense as CSV
    Export {
        /// Output file, "-" for stdout (default: the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract expense fields from receipt text
    Scan(clearspend::cli::ScanArgs),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(clearspend::cli::ExpenseCommands),

    /// Month ledger commands
    #[command(subcommand)]
    Ledger(clearspend::cli::LedgerCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(clearspend::cli::CategoryCommands),

    /// Delete all expenses, ledgers, and categories
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    clearspend::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => ClearSpendPaths::with_base_dir(dir),
        None => ClearSpendPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ClearSpend at: {}", paths.data_dir().display());
            let storage = clearspend::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "{} categories are available.",
                storage.categories.len()?
            );
            println!("Run 'clearspend category list' to see all categories.");
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(&storage, &settings, output)?;
        }
        Some(Commands::Scan(args)) => {
            handle_scan_command(&storage, &settings, args)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Ledger(cmd)) => {
            handle_ledger_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            storage.reset()?;
            println!("All expenses, ledgers, and categories have been deleted.");
        }
        Some(Commands::Config) => {
            println!("ClearSpend Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Payment method:       {}", settings.default_payment_method);
            println!("  Scan payment method:  {}", settings.scan_payment_method);
            println!("  Export file name:     {}", settings.export_file_name);
            println!("  Setup completed:      {}", settings.setup_completed);
        }
        None => {
            println!("ClearSpend - Personal expense tracking");
            println!();
            println!("Run 'clearspend --help' for usage information.");
        }
    }

    Ok(())
}
