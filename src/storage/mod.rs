//! Storage layer for ClearSpend
//!
//! One JSON file per entity type, held in memory as `Table`s and written back
//! together. Services talk to storage through the `LedgerStore` trait so the
//! handle is always passed in explicitly.

pub mod file_io;
pub mod init;
pub mod table;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, seed_default_categories};
pub use table::{Record, Table};

use tracing::{debug, warn};

use crate::config::paths::ClearSpendPaths;
use crate::error::ClearSpendError;
use crate::models::{Category, Expense, MonthLedger, SubCategory};

/// Access to the table holding records of type `R`
pub trait Collection<R: Record> {
    fn collection(&self) -> &Table<R>;
}

/// Persistent store of categories, sub-categories, ledgers, and expenses
///
/// Reads see every write made through the same handle, saved or not.
/// `save` commits all pending changes in one step.
pub trait LedgerStore:
    Collection<Category> + Collection<SubCategory> + Collection<MonthLedger> + Collection<Expense>
{
    /// Records of type `R` matching `predicate`, in listing order
    fn fetch<R, F>(&self, predicate: F) -> Result<Vec<R>, ClearSpendError>
    where
        R: Record,
        F: Fn(&R) -> bool,
        Self: Collection<R>,
    {
        Collection::<R>::collection(self).filter(predicate)
    }

    fn get<R>(&self, id: R::Id) -> Result<Option<R>, ClearSpendError>
    where
        R: Record,
        Self: Collection<R>,
    {
        Collection::<R>::collection(self).get(id)
    }

    /// Insert a record, replacing any record with the same id
    fn insert<R>(&self, record: R) -> Result<(), ClearSpendError>
    where
        R: Record,
        Self: Collection<R>,
    {
        Collection::<R>::collection(self).upsert(record)
    }

    /// Remove a record, returning whether it existed
    fn delete<R>(&self, id: R::Id) -> Result<bool, ClearSpendError>
    where
        R: Record,
        Self: Collection<R>,
    {
        Ok(Collection::<R>::collection(self).remove(id)?.is_some())
    }

    /// Persist all pending changes
    ///
    /// On failure the pending changes are dropped and reads again reflect
    /// what is on disk, so a retried operation starts from the last commit.
    fn save(&self) -> Result<(), ClearSpendError>;
}

/// File-backed `LedgerStore`
pub struct Storage {
    paths: ClearSpendPaths,
    pub categories: Table<Category>,
    pub sub_categories: Table<SubCategory>,
    pub ledgers: Table<MonthLedger>,
    pub expenses: Table<Expense>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ClearSpendPaths) -> Result<Self, ClearSpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: Table::new(paths.categories_file()),
            sub_categories: Table::new(paths.sub_categories_file()),
            ledgers: Table::new(paths.ledgers_file()),
            expenses: Table::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &ClearSpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ClearSpendError> {
        self.reload()
    }

    fn reload(&self) -> Result<(), ClearSpendError> {
        self.categories.load()?;
        self.sub_categories.load()?;
        self.ledgers.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all tables
    ///
    /// Every table is staged before any file is replaced, so a staging
    /// failure leaves the files untouched. If the save fails, the in-memory
    /// tables are reloaded from disk.
    pub fn save_all(&self) -> Result<(), ClearSpendError> {
        let committed = file_io::commit_all(vec![
            self.categories.stage(),
            self.sub_categories.stage(),
            self.ledgers.stage(),
            self.expenses.stage(),
        ]);

        if let Err(e) = committed {
            warn!(error = %e, "save failed, discarding pending changes");
            if let Err(reload) = self.reload() {
                warn!(error = %reload, "could not reload tables after failed save");
            }
            return Err(e);
        }

        debug!(
            categories = self.categories.len()?,
            sub_categories = self.sub_categories.len()?,
            ledgers = self.ledgers.len()?,
            expenses = self.expenses.len()?,
            "saved ledger store"
        );
        Ok(())
    }

    /// Delete every record of every type and persist the empty store
    pub fn reset(&self) -> Result<(), ClearSpendError> {
        self.expenses.clear()?;
        self.ledgers.clear()?;
        self.sub_categories.clear()?;
        self.categories.clear()?;
        self.save_all()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

impl Collection<Category> for Storage {
    fn collection(&self) -> &Table<Category> {
        &self.categories
    }
}

impl Collection<SubCategory> for Storage {
    fn collection(&self) -> &Table<SubCategory> {
        &self.sub_categories
    }
}

impl Collection<MonthLedger> for Storage {
    fn collection(&self) -> &Table<MonthLedger> {
        &self.ledgers
    }
}

impl Collection<Expense> for Storage {
    fn collection(&self) -> &Table<Expense> {
        &self.expenses
    }
}

impl LedgerStore for Storage {
    fn save(&self) -> Result<(), ClearSpendError> {
        self.save_all()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::create_test_storage;
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_reads_see_unsaved_writes() {
        let (_temp_dir, storage) = create_test_storage();
        let category = Category::with_defaults("Food");
        storage.insert(category.clone()).unwrap();

        let found: Vec<Category> = storage.fetch(|c: &Category| c.name == "Food").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, category.id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, storage) = create_test_storage();
        let ledger = MonthLedger::new(2026, 3);
        let expense = Expense::new(
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            "Card",
        );
        storage.insert(ledger.clone()).unwrap();
        storage.insert(expense.clone()).unwrap();
        storage.save().unwrap();

        let paths = ClearSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();

        let loaded: Option<Expense> = reopened.get(expense.id).unwrap();
        assert_eq!(loaded.unwrap().amount, Money::from_cents(1250));
        assert!(reopened.get::<MonthLedger>(ledger.id).unwrap().is_some());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let sub = SubCategory::new("Coffee", None);
        storage.insert(sub.clone()).unwrap();

        assert!(storage.delete::<SubCategory>(sub.id).unwrap());
        assert!(!storage.delete::<SubCategory>(sub.id).unwrap());
    }

    #[test]
    fn test_failed_save_discards_pending_changes() {
        let (temp_dir, storage) = create_test_storage();
        storage.insert(Category::with_defaults("Rent")).unwrap();
        storage.save().unwrap();

        // A plain file where the data directory was makes staging fail
        let data_dir = temp_dir.path().join("data");
        std::fs::rename(&data_dir, temp_dir.path().join("moved")).unwrap();
        std::fs::write(&data_dir, b"not a directory").unwrap();

        storage.insert(Category::with_defaults("Food")).unwrap();
        assert!(storage.save().is_err());
        assert!(storage
            .fetch(|c: &Category| c.name == "Food")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reset_empties_everything() {
        let (temp_dir, storage) = create_test_storage();
        storage.insert(Category::with_defaults("Food")).unwrap();
        storage.insert(MonthLedger::new(2026, 1)).unwrap();
        storage.save().unwrap();

        storage.reset().unwrap();
        assert!(storage.categories.is_empty().unwrap());

        let paths = ClearSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert!(reopened.categories.is_empty().unwrap());
        assert!(reopened.ledgers.is_empty().unwrap());
    }
}
