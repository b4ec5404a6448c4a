//! Month ledger model
//!
//! A ledger groups every expense recorded in one calendar month. There is at
//! most one ledger per (year, month); the resolver enforces this.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, LedgerId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthLedger {
    pub id: LedgerId,

    /// Month, 1-12
    pub month: u32,

    pub year: i32,

    pub created_at: DateTime<Utc>,

    /// Owned expenses, in insertion order
    #[serde(default)]
    pub expense_ids: Vec<ExpenseId>,
}

impl MonthLedger {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            id: LedgerId::new(),
            month,
            year,
            created_at: Utc::now(),
            expense_ids: Vec::new(),
        }
    }

    /// Create the ledger covering `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Natural key
    pub fn key(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Check whether `date` falls in this ledger's month
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in this ledger's month
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        match (self.first_day(), NaiveDate::from_ymd_opt(next_year, next_month, 1)) {
            (Some(start), Some(next)) => (next - start).num_days() as u32,
            _ => 30,
        }
    }

    /// Append an expense (no-op if already attached)
    pub fn attach(&mut self, expense_id: ExpenseId) {
        if !self.expense_ids.contains(&expense_id) {
            self.expense_ids.push(expense_id);
        }
    }

    /// Remove an expense, returning whether it was attached
    pub fn detach(&mut self, expense_id: ExpenseId) -> bool {
        let before = self.expense_ids.len();
        self.expense_ids.retain(|id| *id != expense_id);
        self.expense_ids.len() != before
    }
}

impl fmt::Display for MonthLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
