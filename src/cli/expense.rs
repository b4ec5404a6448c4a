//! Expense CLI commands
//!
//! Implements CLI commands for manual expense entry and maintenance.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_register};
use crate::error::{ClearSpendError, ClearSpendResult};
use crate::models::{Category, Expense, Money, SubCategory};
use crate::services::ledger::parse_month;
use crate::services::{ExpenseFilter, ExpenseService, ExpenseUpdate, NewExpense};
use crate::storage::LedgerStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Expense date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method (default from settings)
        #[arg(short, long)]
        payment_method: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Sub-category name (default "General")
        #[arg(short, long)]
        sub_category: Option<String>,
        /// Merchant name
        #[arg(short, long)]
        merchant: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
        /// Photo of the bill
        #[arg(long)]
        bill_image: Option<PathBuf>,
    },

    /// List expenses, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show expense details
    Show {
        /// Expense ID (full or short form)
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (full or short form)
        expense: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New payment method
        #[arg(short, long)]
        payment_method: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New sub-category name (with --category)
        #[arg(short, long)]
        sub_category: Option<String>,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        clear_category: bool,
        /// New merchant (empty to clear)
        #[arg(short, long)]
        merchant: Option<String>,
        /// New note (empty to clear)
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ClearSpendResult<()> {
    let service = ExpenseService::new(store);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            payment_method,
            category,
            sub_category,
            merchant,
            note,
            bill_image,
        } => {
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => Local::now().date_naive(),
            };

            let payment_method =
                payment_method.unwrap_or_else(|| settings.default_payment_method.clone());
            let mut input = NewExpense::new(parse_amount(&amount)?, date, payment_method);
            input.category = category;
            input.sub_category = sub_category;
            input.merchant = merchant;
            input.note = note;

            if let Some(path) = bill_image {
                let bytes = std::fs::read(&path).map_err(|e| {
                    ClearSpendError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                input.bill_image = Some(bytes);
            }

            let expense = service.create(input)?;
            println!("Added expense: {}", expense.id);
            print!(
                "{}",
                format_expense_details(&expense, classification(store, &expense)?.as_deref(), symbol)
            );
        }

        ExpenseCommands::List { month, limit } => {
            let mut filter = ExpenseFilter::new().limit(limit);
            if let Some(text) = month {
                let (year, month) = parse_month(&text)?;
                filter = filter.month(year, month);
            }

            let expenses = service.list(filter)?;
            print!("{}", format_expense_register(&expenses, symbol));
        }

        ExpenseCommands::Show { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| ClearSpendError::expense_not_found(&expense))?;
            print!(
                "{}",
                format_expense_details(&found, classification(store, &found)?.as_deref(), symbol)
            );
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            payment_method,
            category,
            sub_category,
            clear_category,
            merchant,
            note,
        } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| ClearSpendError::expense_not_found(&expense))?;

            let changes = ExpenseUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                payment_method,
                category: if clear_category {
                    Some(None)
                } else {
                    category.map(Some)
                },
                sub_category,
                merchant: merchant.map(|m| Some(m).filter(|m| !m.is_empty())),
                note: note.map(|n| Some(n).filter(|n| !n.is_empty())),
            };

            let updated = service.update(found.id, changes)?;
            println!("Updated expense: {}", updated.id);
            print!(
                "{}",
                format_expense_details(&updated, classification(store, &updated)?.as_deref(), symbol)
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| ClearSpendError::expense_not_found(&expense))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted);
        }
    }

    Ok(())
}

/// "Category / Sub-category" label for an expense
pub(crate) fn classification<S: LedgerStore>(
    store: &S,
    expense: &Expense,
) -> ClearSpendResult<Option<String>> {
    let Some(sub_id) = expense.sub_category_id else {
        return Ok(None);
    };
    let Some(sub) = store.get::<SubCategory>(sub_id)? else {
        return Ok(None);
    };

    let category = match sub.category_id {
        Some(id) => store.get::<Category>(id)?,
        None => None,
    };

    Ok(Some(match category {
        Some(category) => format!("{} / {}", category.name, sub.name),
        None => sub.name,
    }))
}

fn parse_amount(text: &str) -> ClearSpendResult<Money> {
    Money::parse(text).map_err(|e| ClearSpendError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_date(text: &str) -> ClearSpendResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ClearSpendError::Validation(format!("Invalid date '{}' (use YYYY-MM-DD)", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::create_test_storage;

    #[test]
    fn test_add_edit_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Add {
                amount: "12.50".into(),
                date: Some("2026-03-15".into()),
                payment_method: Some("Card".into()),
                category: Some("Food".into()),
                sub_category: None,
                merchant: Some("Deli".into()),
                note: None,
                bill_image: None,
            },
        )
        .unwrap();

        let expense = storage.expenses.get_all().unwrap().pop().unwrap();
        assert_eq!(
            classification(&storage, &expense).unwrap().as_deref(),
            Some("Food / General")
        );

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Edit {
                expense: expense.id.short(),
                amount: None,
                date: Some("2026-04-02".into()),
                payment_method: None,
                category: None,
                sub_category: None,
                clear_category: true,
                merchant: Some(String::new()),
                note: None,
            },
        )
        .unwrap();

        let edited = storage.get::<Expense>(expense.id).unwrap().unwrap();
        assert!(edited.merchant.is_none());
        assert!(edited.sub_category_id.is_none());
        assert_eq!(edited.date, NaiveDate::from_ymd_opt(2026, 4, 2).unwrap());

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Delete {
                expense: expense.id.as_uuid().to_string(),
            },
        )
        .unwrap();
        assert!(storage.expenses.is_empty().unwrap());
    }

    #[test]
    fn test_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();

        let result = handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Add {
                amount: "twelve".into(),
                date: None,
                payment_method: None,
                category: None,
                sub_category: None,
                merchant: None,
                note: None,
                bill_image: None,
            },
        );
        assert!(result.unwrap_err().is_validation());

        let missing = handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Show {
                expense: "exp-00000000".into(),
            },
        );
        assert!(missing.unwrap_err().is_not_found());
    }
}
