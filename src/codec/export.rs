//! CSV export
//!
//! Writes one row per expense: ledgers newest month first, each ledger's
//! expenses in the ledger's own order.

use std::collections::HashMap;
use std::io::Write;

use tracing::info;

use crate::error::{ClearSpendError, ClearSpendResult};
use crate::models::{Category, CategoryId, Expense, MonthLedger, SubCategory, SubCategoryId};
use crate::storage::LedgerStore;

use super::HEADER;

/// Export every expense in the store as CSV text
pub fn export<S: LedgerStore>(store: &S) -> ClearSpendResult<String> {
    let mut output = Vec::new();
    write_expenses_csv(store, &mut output)?;
    String::from_utf8(output).map_err(|e| ClearSpendError::Export(e.to_string()))
}

/// Stream every expense in the store as CSV into `writer`
pub fn write_expenses_csv<S, W>(store: &S, writer: &mut W) -> ClearSpendResult<usize>
where
    S: LedgerStore,
    W: Write,
{
    // Build lookups
    let category_names: HashMap<CategoryId, String> = store
        .fetch(|_: &Category| true)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let sub_categories: HashMap<SubCategoryId, SubCategory> = store
        .fetch(|_: &SubCategory| true)?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    writeln!(writer, "{}", HEADER.join(",")).map_err(|e| ClearSpendError::Export(e.to_string()))?;

    let ledgers: Vec<MonthLedger> = store.fetch(|_: &MonthLedger| true)?;
    let mut rows = 0;

    for ledger in &ledgers {
        for expense_id in &ledger.expense_ids {
            // Ledger entries whose expense no longer exists are skipped
            let Some(expense) = store.get::<Expense>(*expense_id)? else {
                continue;
            };

            let sub_category = expense
                .sub_category_id
                .and_then(|id| sub_categories.get(&id));

            let category_name = sub_category
                .and_then(|s| s.category_id)
                .and_then(|id| category_names.get(&id))
                .map(String::as_str)
                .unwrap_or("");

            let sub_category_name = sub_category.map(|s| s.name.as_str()).unwrap_or("");

            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                expense.id.as_uuid(),
                expense.date.format("%Y-%m-%d"),
                expense.amount.to_decimal_string(),
                escape_csv(&expense.payment_method),
                escape_csv(category_name),
                escape_csv(sub_category_name),
                escape_csv(expense.merchant.as_deref().unwrap_or("")),
                escape_csv(expense.note.as_deref().unwrap_or(""))
            )
            .map_err(|e| ClearSpendError::Export(e.to_string()))?;

            rows += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| ClearSpendError::Export(e.to_string()))?;

    info!(rows, ledgers = ledgers.len(), "exported expenses");
    Ok(rows)
}

/// Escape a string for CSV format
pub fn escape_csv(s: &str) -> String {
    if s.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
