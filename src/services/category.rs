//! Category service
//!
//! Listing the category tree, deleting a category together with its
//! sub-categories, and seeding the default tree.

use tracing::info;

use crate::error::{ClearSpendError, ClearSpendResult};
use crate::models::{Category, CategoryId, Expense, SubCategory};
use crate::storage::{seed_default_categories, LedgerStore};

/// A category with its sub-categories in display order
#[derive(Debug, Clone)]
pub struct CategoryWithSubCategories {
    pub category: Category,
    pub sub_categories: Vec<SubCategory>,
}

/// Service for category management
pub struct CategoryService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> CategoryService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ClearSpendResult<Vec<Category>> {
        self.store.fetch(|_: &Category| true)
    }

    /// Every category with its sub-categories
    pub fn list_with_sub_categories(&self) -> ClearSpendResult<Vec<CategoryWithSubCategories>> {
        let mut result = Vec::new();

        for category in self.list()? {
            let mut sub_categories = Vec::with_capacity(category.sub_category_ids.len());
            for id in &category.sub_category_ids {
                if let Some(sub) = self.store.get::<SubCategory>(*id)? {
                    sub_categories.push(sub);
                }
            }

            result.push(CategoryWithSubCategories {
                category,
                sub_categories,
            });
        }

        Ok(result)
    }

    /// Find a category by exact name or id
    pub fn find(&self, identifier: &str) -> ClearSpendResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.store.get::<Category>(id)? {
                return Ok(Some(category));
            }
        }

        let mut matches: Vec<Category> = self.store.fetch(|c: &Category| c.name == identifier)?;
        Ok(matches.pop())
    }

    /// Delete a category and its sub-categories
    ///
    /// Expenses that used one of the sub-categories become uncategorized.
    /// Returns the number of expenses affected.
    pub fn delete_category(&self, id: CategoryId) -> ClearSpendResult<usize> {
        let category: Category = self
            .store
            .get(id)?
            .ok_or_else(|| ClearSpendError::category_not_found(id.to_string()))?;

        let owned: Vec<SubCategory> = self
            .store
            .fetch(|s: &SubCategory| s.category_id == Some(id))?;

        let affected: Vec<Expense> = self.store.fetch(|e: &Expense| {
            e.sub_category_id
                .is_some_and(|sub| owned.iter().any(|s| s.id == sub))
        })?;

        for mut expense in affected.iter().cloned() {
            expense.sub_category_id = None;
            self.store.insert(expense)?;
        }

        for sub in &owned {
            self.store.delete::<SubCategory>(sub.id)?;
        }
        self.store.delete::<Category>(id)?;
        self.store.save()?;

        info!(
            category = %category.name,
            sub_categories = owned.len(),
            expenses = affected.len(),
            "deleted category"
        );
        Ok(affected.len())
    }

    /// Seed the default categories if none exist; returns how many were added
    pub fn seed_defaults(&self) -> ClearSpendResult<usize> {
        let created = seed_default_categories(self.store)?;
        if created > 0 {
            self.store.save()?;
        }
        Ok(created)
    }
}
