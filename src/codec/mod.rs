//! CSV codec for expense exchange files
//!
//! - `export`: serializes every expense to the exchange format
//! - `parse`: splits CSV text into trimmed rows of fields
//!
//! Both halves are pure over their inputs; the exchange format has eight
//! columns in the order given by `HEADER`.

pub mod export;
pub mod parse;

pub use export::{escape_csv, export, write_expenses_csv};
pub use parse::parse_rows;

/// Column names of the exchange format, in order
pub const HEADER: [&str; 8] = [
    "id",
    "date",
    "amount",
    "payment_method",
    "category",
    "subcategory",
    "merchant",
    "note",
];
