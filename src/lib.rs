//! ClearSpend - Personal expense tracking from the command line
//!
//! This library provides the core functionality for ClearSpend: expenses
//! grouped into month ledgers and classified by a two-level category tree,
//! a CSV exchange format for moving data between installations, and a
//! receipt scanner that turns OCR text into an expense draft.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, ledgers, expenses)
//! - `storage`: JSON file storage layer and the `LedgerStore` trait
//! - `codec`: CSV export and parsing
//! - `receipt`: Field extraction from receipt text
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use clearspend::config::{paths::ClearSpendPaths, settings::Settings};
//! use clearspend::storage::Storage;
//!
//! let paths = ClearSpendPaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let csv = clearspend::export(&storage)?;
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod receipt;
pub mod services;
pub mod storage;

pub use codec::export;
pub use error::{ClearSpendError, ImportError};
pub use receipt::extract;
pub use services::ImportService;
pub use storage::{LedgerStore, Storage};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `clearspend=info`).
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("clearspend=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
