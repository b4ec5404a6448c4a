//! Service layer for ClearSpend
//!
//! Business logic on top of a `LedgerStore`: entity resolution, CSV import,
//! and expense, ledger, and category management. Every service borrows the
//! store it works on.

pub mod category;
pub mod expense;
pub mod import;
pub mod ledger;
pub mod resolver;

pub use category::{CategoryService, CategoryWithSubCategories};
pub use expense::{ExpenseFilter, ExpenseService, ExpenseUpdate, NewExpense};
pub use import::{ImportService, ImportSummary};
pub use ledger::{LedgerService, LedgerSummary};
pub use resolver::EntityResolver;
