//! Entity resolver
//!
//! Find-or-create for categories, sub-categories, and month ledgers by their
//! natural keys. Lookups are exact and case-sensitive. New entities are
//! inserted into the store but never committed here; the caller owns the
//! commit boundary.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::ClearSpendResult;
use crate::models::{Category, MonthLedger, SubCategory};
use crate::storage::LedgerStore;

/// Idempotent find-or-create over a ledger store
pub struct EntityResolver<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> EntityResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Category named exactly `name`, created with the default icon and colour
    pub fn resolve_category(&self, name: &str) -> ClearSpendResult<Category> {
        let existing: Vec<Category> = self.store.fetch(|c: &Category| c.name == name)?;
        if let Some(category) = existing.into_iter().next() {
            return Ok(category);
        }

        let mut category = Category::with_defaults(name);
        category.sort_order = self.next_category_order()?;
        self.store.insert(category.clone())?;

        debug!(category = %category.id, name, "created category");
        Ok(category)
    }

    /// Sub-category named exactly `name` under `category`
    ///
    /// A new sub-category is appended to the owning category's list.
    pub fn resolve_sub_category(
        &self,
        name: &str,
        category: &Category,
    ) -> ClearSpendResult<SubCategory> {
        let existing: Vec<SubCategory> = self.store.fetch(|s: &SubCategory| {
            s.category_id == Some(category.id) && s.name == name
        })?;
        if let Some(sub) = existing.into_iter().next() {
            return Ok(sub);
        }

        // Re-read so a stale copy of the category doesn't drop earlier attachments
        let mut owner = self
            .store
            .get::<Category>(category.id)?
            .unwrap_or_else(|| category.clone());

        let mut sub = SubCategory::new(name, Some(owner.id));
        sub.sort_order = owner.sub_category_ids.len() as i32;
        owner.attach_sub_category(sub.id);

        self.store.insert(sub.clone())?;
        self.store.insert(owner)?;

        debug!(sub_category = %sub.id, name, category = %category.name, "created sub-category");
        Ok(sub)
    }

    /// The ledger for the month containing `date`
    pub fn resolve_ledger(&self, date: NaiveDate) -> ClearSpendResult<MonthLedger> {
        let (year, month) = (date.year(), date.month());
        let existing: Vec<MonthLedger> = self
            .store
            .fetch(|l: &MonthLedger| l.year == year && l.month == month)?;
        if let Some(ledger) = existing.into_iter().next() {
            return Ok(ledger);
        }

        let ledger = MonthLedger::new(year, month);
        self.store.insert(ledger.clone())?;

        debug!(ledger = %ledger.id, month = %ledger, "created month ledger");
        Ok(ledger)
    }

    fn next_category_order(&self) -> ClearSpendResult<i32> {
        let categories: Vec<Category> = self.store.fetch(|_: &Category| true)?;
        Ok(categories
            .iter()
            .map(|c| c.sort_order)
            .max()
            .map_or(0, |max| max + 1))
    }
}
