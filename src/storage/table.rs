//! Generic in-memory table backed by one JSON file
//!
//! Every entity type is kept in a `Table`: a map from id to record guarded by
//! an `RwLock`, loaded from and staged back to its own JSON file.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::ClearSpendError;
use crate::models::{
    Category, CategoryId, Expense, ExpenseId, LedgerId, MonthLedger, SubCategory, SubCategoryId,
};

use super::file_io::{read_json, stage_json, StagedWrite};

/// An entity that can live in a `Table`
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync;

    /// Human-readable entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    /// Order used when listing records
    fn listing_order(&self, other: &Self) -> Ordering;
}

impl Record for Category {
    type Id = CategoryId;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        (self.sort_order, &self.name).cmp(&(other.sort_order, &other.name))
    }
}

impl Record for SubCategory {
    type Id = SubCategoryId;
    const ENTITY: &'static str = "SubCategory";

    fn id(&self) -> SubCategoryId {
        self.id
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        (self.sort_order, &self.name).cmp(&(other.sort_order, &other.name))
    }
}

impl Record for MonthLedger {
    type Id = LedgerId;
    const ENTITY: &'static str = "Ledger";

    fn id(&self) -> LedgerId {
        self.id
    }

    /// Newest month first
    fn listing_order(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY: &'static str = "Expense";

    fn id(&self) -> ExpenseId {
        self.id
    }

    /// Newest first
    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then(other.created_at.cmp(&self.created_at))
            .then(self.id.cmp(&other.id))
    }
}

#[derive(Serialize, Deserialize)]
struct TableFile<R> {
    records: Vec<R>,
}

impl<R> Default for TableFile<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// A keyed collection of records persisted to one file
pub struct Table<R: Record> {
    path: PathBuf,
    data: RwLock<HashMap<R::Id, R>>,
}

impl<R: Record> Table<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<R::Id, R>>, ClearSpendError> {
        self.data
            .read()
            .map_err(|e| ClearSpendError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<R::Id, R>>, ClearSpendError> {
        self.data
            .write()
            .map_err(|e| ClearSpendError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory contents with what is on disk
    pub fn load(&self) -> Result<(), ClearSpendError> {
        let file_data: TableFile<R> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file_data.records {
            data.insert(record.id(), record);
        }

        debug!(entity = R::ENTITY, count = data.len(), "loaded table");
        Ok(())
    }

    /// Serialize the current contents to a temp file, ready to commit
    pub fn stage(&self) -> Result<StagedWrite, ClearSpendError> {
        let data = self.read()?;

        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| a.listing_order(b));

        stage_json(&self.path, &TableFile { records })
    }

    pub fn get(&self, id: R::Id) -> Result<Option<R>, ClearSpendError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in listing order
    pub fn get_all(&self) -> Result<Vec<R>, ClearSpendError> {
        self.filter(|_| true)
    }

    /// Records matching `predicate`, in listing order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<R>, ClearSpendError>
    where
        F: Fn(&R) -> bool,
    {
        let data = self.read()?;
        let mut records: Vec<_> = data.values().filter(|r| predicate(r)).cloned().collect();
        records.sort_by(|a, b| a.listing_order(b));
        Ok(records)
    }

    /// Insert or replace by id
    pub fn upsert(&self, record: R) -> Result<(), ClearSpendError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    pub fn remove(&self, id: R::Id) -> Result<Option<R>, ClearSpendError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn clear(&self) -> Result<(), ClearSpendError> {
        self.write()?.clear();
        Ok(())
    }

    pub fn len(&self) -> Result<usize, ClearSpendError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ClearSpendError> {
        Ok(self.read()?.is_empty())
    }
}
