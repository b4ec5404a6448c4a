//! Expense service
//!
//! Manual and receipt-driven entry, editing, deletion, and listing. Every
//! write keeps the expense inside the ledger for its month and commits once.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::error::{ClearSpendError, ClearSpendResult};
use crate::models::{Category, Expense, ExpenseId, MonthLedger, Money, SubCategoryId};
use crate::receipt::ReceiptFields;
use crate::storage::LedgerStore;

use super::resolver::EntityResolver;

/// Sub-category used when an expense names a category but no sub-category
pub const GENERAL_SUB_CATEGORY: &str = "General";

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub date: NaiveDate,
    pub payment_method: String,
    /// Category name; created if missing
    pub category: Option<String>,
    /// Sub-category name under `category`
    pub sub_category: Option<String>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub bill_image: Option<Vec<u8>>,
}

impl NewExpense {
    pub fn new(amount: Money, date: NaiveDate, payment_method: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            payment_method: payment_method.into(),
            category: None,
            sub_category: None,
            merchant: None,
            note: None,
            bill_image: None,
        }
    }
}

/// Changes to an existing expense; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    /// `Some(None)` clears the classification
    pub category: Option<Option<String>>,
    /// Only read when `category` is `Some(Some(_))`
    pub sub_category: Option<String>,
    /// `Some(None)` clears the merchant
    pub merchant: Option<Option<String>>,
    /// `Some(None)` clears the note
    pub note: Option<Option<String>>,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses dated in this (year, month)
    pub month: Option<(i32, u32)>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for expense management
pub struct ExpenseService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> ExpenseService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a new expense in the ledger for its month
    pub fn create(&self, input: NewExpense) -> ClearSpendResult<Expense> {
        let mut expense = Expense::new(input.amount, input.date, input.payment_method.trim());
        expense.merchant = clean(input.merchant);
        expense.note = clean(input.note);
        expense.bill_image = input.bill_image;

        expense
            .validate()
            .map_err(|e| ClearSpendError::Validation(e.to_string()))?;

        let resolver = EntityResolver::new(self.store);
        expense.sub_category_id =
            self.classify(&resolver, input.category.as_deref(), input.sub_category.as_deref())?;

        let mut ledger = resolver.resolve_ledger(expense.date)?;
        ledger.attach(expense.id);

        self.store.insert(expense.clone())?;
        self.store.insert(ledger)?;
        self.store.save()?;

        info!(expense = %expense.id, amount = %expense.amount, "created expense");
        Ok(expense)
    }

    /// Draft an expense from a scanned receipt
    ///
    /// The suggested category is kept only when a category with exactly that
    /// name already exists. Scanning never creates categories.
    pub fn draft_from_receipt(
        &self,
        fields: &ReceiptFields,
        today: NaiveDate,
    ) -> ClearSpendResult<NewExpense> {
        let mut draft = fields.to_draft(today);

        if let Some(name) = draft.category.take() {
            let existing: Vec<Category> = self.store.fetch(|c: &Category| c.name == name)?;
            if existing.is_empty() {
                debug!(suggestion = %name, "no category with the suggested name");
            } else {
                draft.category = Some(name);
            }
        }

        Ok(draft)
    }

    pub fn get(&self, id: ExpenseId) -> ClearSpendResult<Option<Expense>> {
        self.store.get(id)
    }

    /// Find an expense by full id or its short `exp-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> ClearSpendResult<Option<Expense>> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.store.get(id);
        }

        let prefix = identifier.strip_prefix("exp-").unwrap_or(identifier).to_lowercase();
        if prefix.is_empty() {
            return Ok(None);
        }

        let mut matches: Vec<Expense> = self
            .store
            .fetch(|e: &Expense| e.id.as_uuid().to_string().starts_with(&prefix))?;

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ClearSpendError::Validation(format!(
                "'{}' matches {} expenses; use more of the id",
                identifier, n
            ))),
        }
    }

    /// List expenses newest first
    pub fn list(&self, filter: ExpenseFilter) -> ClearSpendResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = match filter.month {
            Some((year, month)) => self
                .store
                .fetch(|e: &Expense| e.date.year() == year && e.date.month() == month)?,
            None => self.store.fetch(|_: &Expense| true)?,
        };

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Apply changes to an expense
    ///
    /// Moving the date into another month moves the expense into that
    /// month's ledger in the same commit.
    pub fn update(&self, id: ExpenseId, changes: ExpenseUpdate) -> ClearSpendResult<Expense> {
        let mut expense: Expense = self
            .store
            .get(id)?
            .ok_or_else(|| ClearSpendError::expense_not_found(id.to_string()))?;

        let old_date = expense.date;

        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(method) = changes.payment_method {
            expense.payment_method = method.trim().to_string();
        }
        if let Some(merchant) = changes.merchant {
            expense.merchant = clean(merchant);
        }
        if let Some(note) = changes.note {
            expense.note = clean(note);
        }

        expense
            .validate()
            .map_err(|e| ClearSpendError::Validation(e.to_string()))?;

        let resolver = EntityResolver::new(self.store);

        // category: Option<Option<String>>
        // - None: no change
        // - Some(None): clear
        // - Some(Some(name)): resolve
        if let Some(category) = changes.category {
            expense.sub_category_id =
                self.classify(&resolver, category.as_deref(), changes.sub_category.as_deref())?;
        }

        if (old_date.year(), old_date.month()) != (expense.date.year(), expense.date.month()) {
            self.detach_everywhere(expense.id)?;

            let mut ledger = resolver.resolve_ledger(expense.date)?;
            ledger.attach(expense.id);
            self.store.insert(ledger)?;

            info!(expense = %expense.id, from = %old_date, to = %expense.date, "moved expense to another month");
        }

        self.store.insert(expense.clone())?;
        self.store.save()?;

        Ok(expense)
    }

    /// Delete an expense and remove it from its ledger
    pub fn delete(&self, id: ExpenseId) -> ClearSpendResult<Expense> {
        let expense: Expense = self
            .store
            .get(id)?
            .ok_or_else(|| ClearSpendError::expense_not_found(id.to_string()))?;

        self.detach_everywhere(id)?;
        self.store.delete::<Expense>(id)?;
        self.store.save()?;

        info!(expense = %id, "deleted expense");
        Ok(expense)
    }

    fn detach_everywhere(&self, id: ExpenseId) -> ClearSpendResult<()> {
        let ledgers: Vec<MonthLedger> = self
            .store
            .fetch(|l: &MonthLedger| l.expense_ids.contains(&id))?;

        for mut ledger in ledgers {
            ledger.detach(id);
            self.store.insert(ledger)?;
        }
        Ok(())
    }

    /// Resolve category and sub-category names to a sub-category id
    fn classify(
        &self,
        resolver: &EntityResolver<'_, S>,
        category: Option<&str>,
        sub_category: Option<&str>,
    ) -> ClearSpendResult<Option<SubCategoryId>> {
        let Some(category_name) = category.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let sub_name = sub_category
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(GENERAL_SUB_CATEGORY);

        let category = resolver.resolve_category(category_name)?;
        let sub = resolver.resolve_sub_category(sub_name, &category)?;
        Ok(Some(sub.id))
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
