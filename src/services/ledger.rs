//! Ledger service
//!
//! Month ledgers and the spending summary shown for a month.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{ClearSpendError, ClearSpendResult};
use crate::models::{Category, CategoryId, Expense, MonthLedger, Money, SubCategory};
use crate::storage::LedgerStore;

use super::resolver::EntityResolver;

/// Bucket for expenses without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

const TOP_CATEGORY_COUNT: usize = 3;
const RECENT_EXPENSE_COUNT: usize = 5;

/// Spending summary for one month
#[derive(Debug, Clone)]
pub struct LedgerSummary {
    pub ledger: MonthLedger,
    pub total: Money,
    pub count: usize,
    /// Total divided by the days of the month elapsed so far
    pub average_daily: Money,
    /// Largest categories by amount, biggest first
    pub top_categories: Vec<(String, Money)>,
    /// Newest expenses first
    pub recent: Vec<Expense>,
}

/// Service for month ledgers
pub struct LedgerService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> LedgerService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All ledgers, newest month first
    pub fn list(&self) -> ClearSpendResult<Vec<MonthLedger>> {
        self.store.fetch(|_: &MonthLedger| true)
    }

    /// Ledger for a given month, if one exists
    pub fn find(&self, year: i32, month: u32) -> ClearSpendResult<Option<MonthLedger>> {
        let mut ledgers: Vec<MonthLedger> = self
            .store
            .fetch(|l: &MonthLedger| l.year == year && l.month == month)?;
        Ok(ledgers.pop())
    }

    /// Ledger for the month containing `today`, created if needed
    pub fn current(&self, today: NaiveDate) -> ClearSpendResult<MonthLedger> {
        if let Some(ledger) = self.find(today.year(), today.month())? {
            return Ok(ledger);
        }

        let ledger = EntityResolver::new(self.store).resolve_ledger(today)?;
        self.store.save()?;

        info!(month = %ledger, "opened ledger for current month");
        Ok(ledger)
    }

    /// Summarize one ledger as of `today`
    pub fn summary(&self, ledger: &MonthLedger, today: NaiveDate) -> ClearSpendResult<LedgerSummary> {
        let mut expenses = Vec::with_capacity(ledger.expense_ids.len());
        for id in &ledger.expense_ids {
            if let Some(expense) = self.store.get::<Expense>(*id)? {
                expenses.push(expense);
            }
        }

        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let average_daily = total.divided_by(elapsed_days(ledger, today));
        let top_categories = self.top_categories(&expenses)?;

        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        let count = expenses.len();
        expenses.truncate(RECENT_EXPENSE_COUNT);

        Ok(LedgerSummary {
            ledger: ledger.clone(),
            total,
            count,
            average_daily,
            top_categories,
            recent: expenses,
        })
    }

    fn top_categories(&self, expenses: &[Expense]) -> ClearSpendResult<Vec<(String, Money)>> {
        let category_names: HashMap<CategoryId, String> = self
            .store
            .fetch(|_: &Category| true)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut totals: HashMap<String, Money> = HashMap::new();
        for expense in expenses {
            let name = match expense.sub_category_id {
                Some(id) => self
                    .store
                    .get::<SubCategory>(id)?
                    .and_then(|s| s.category_id)
                    .and_then(|id| category_names.get(&id).cloned()),
                None => None,
            };

            *totals
                .entry(name.unwrap_or_else(|| UNCATEGORIZED.to_string()))
                .or_insert_with(Money::zero) += expense.amount;
        }

        let mut ranked: Vec<(String, Money)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_CATEGORY_COUNT);
        Ok(ranked)
    }
}

/// Days of the ledger's month that have passed as of `today`
///
/// Past months count in full; the current month counts up to today.
fn elapsed_days(ledger: &MonthLedger, today: NaiveDate) -> u32 {
    let days_in_month = ledger.days_in_month();

    if ledger.covers(today) {
        today.day().min(days_in_month)
    } else if ledger.key() < (today.year(), today.month()) {
        days_in_month
    } else {
        // Future month: nothing has elapsed, divide by one day
        1
    }
}

/// Parse a "YYYY-MM" month argument
pub fn parse_month(text: &str) -> ClearSpendResult<(i32, u32)> {
    let invalid = || ClearSpendError::Validation(format!("'{}' is not a month (YYYY-MM)", text));

    let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
