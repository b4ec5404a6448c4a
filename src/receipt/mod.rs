//! Receipt field extraction
//!
//! Heuristics that pull an amount, a date, a merchant name, and a category
//! suggestion out of OCR'd receipt text. Each field is found independently
//! and may be absent; extraction never fails.

pub mod amount;
pub mod category;
pub mod date;
pub mod merchant;

use chrono::NaiveDate;

use crate::models::Money;
use crate::services::NewExpense;

pub use amount::extract_amount;
pub use category::suggest_category;
pub use date::extract_date;
pub use merchant::extract_merchant;

/// Payment method assumed for scanned receipts
pub const DEFAULT_SCAN_PAYMENT_METHOD: &str = "Cash";

/// Fields recovered from one receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFields {
    /// The OCR text as given
    pub full_text: String,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub merchant: Option<String>,
    pub suggested_category: Option<String>,
}

impl ReceiptFields {
    /// Turn the extracted fields into an expense draft
    ///
    /// Missing fields get the usual entry defaults: a zero amount, today's
    /// date, and cash as the payment method.
    pub fn to_draft(&self, today: NaiveDate) -> NewExpense {
        let mut draft = NewExpense::new(
            self.amount.unwrap_or_default(),
            self.date.unwrap_or(today),
            DEFAULT_SCAN_PAYMENT_METHOD,
        );
        draft.merchant = self.merchant.clone();
        draft.category = self.suggested_category.clone();
        draft
    }
}

/// Extract receipt fields from OCR text
pub fn extract(text: &str) -> ReceiptFields {
    ReceiptFields {
        full_text: text.to_string(),
        amount: extract_amount(text),
        date: extract_date(text),
        merchant: extract_merchant(text),
        suggested_category: suggest_category(text).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT: &str = "\
Joe's Pizza
123 Main Street
03/15/2026 12:41
Pepperoni slice     4.50
Soda                2.25
Subtotal            6.75
Tax                 0.60
TOTAL              $7.35
CASH               10.00
";

    #[test]
    fn test_extract_receipt() {
        let fields = extract(RECEIPT);

        assert_eq!(fields.full_text, RECEIPT);
        // First total-like line wins
        assert_eq!(fields.amount, Some(Money::from_cents(675)));
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2026, 3, 15));
        assert_eq!(fields.merchant.as_deref(), Some("Joe's Pizza"));
        assert_eq!(fields.suggested_category.as_deref(), Some("Food & Dining"));
    }

    #[test]
    fn test_empty_text() {
        let fields = extract("");
        assert_eq!(fields.amount, None);
        assert_eq!(fields.date, None);
        assert_eq!(fields.merchant, None);
        assert_eq!(fields.suggested_category, None);
    }

    #[test]
    fn test_draft_defaults() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let draft = extract("thank you").to_draft(today);

        assert_eq!(draft.amount, Money::zero());
        assert_eq!(draft.date, today);
        assert_eq!(draft.payment_method, "Cash");
        assert!(draft.category.is_none());
        assert_eq!(draft.merchant.as_deref(), Some("thank you"));
    }

    #[test]
    fn test_draft_from_receipt() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let draft = extract(RECEIPT).to_draft(today);

        assert_eq!(draft.amount, Money::from_cents(675));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(draft.category.as_deref(), Some("Food & Dining"));
    }
}
