//! Core data models for ClearSpend
//!
//! Categories, sub-categories, month ledgers, and expenses. Relationships are
//! stored as typed identifiers and resolved through the ledger store.

pub mod category;
pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;

pub use category::{Category, CategoryValidationError, SubCategory};
pub use expense::{Expense, ExpenseValidationError, UNKNOWN_PAYMENT_METHOD};
pub use ids::{CategoryId, ExpenseId, LedgerId, SubCategoryId};
pub use ledger::MonthLedger;
pub use money::Money;
