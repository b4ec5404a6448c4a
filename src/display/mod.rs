//! Display formatting for terminal output
//!
//! Plain-text tables and detail views used by the CLI.

pub mod category;
pub mod expense;
pub mod ledger;
pub mod receipt;

pub use category::format_category_tree;
pub use expense::{format_expense_details, format_expense_register, format_expense_row};
pub use ledger::{format_ledger_list, format_ledger_summary};
pub use receipt::format_receipt_fields;

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc  ");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("€€€€€€€€", 5), "€€...");
    }
}
