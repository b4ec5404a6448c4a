//! Expense model
//!
//! The `id` is stable across export and import and doubles as the dedup key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, SubCategoryId};
use super::money::Money;

/// Payment method recorded when the CSV column is empty
pub const UNKNOWN_PAYMENT_METHOD: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Non-negative amount
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    /// Free-form payment method ("Cash", "Card", "UPI", ...)
    pub payment_method: String,

    #[serde(default)]
    pub sub_category_id: Option<SubCategoryId>,

    /// Photo of the bill, stored as base64 in JSON
    #[serde(default, skip_serializing_if = "Option::is_none", with = "bill_image")]
    pub bill_image: Option<Vec<u8>>,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(amount: Money, date: NaiveDate, payment_method: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            date,
            note: None,
            merchant: None,
            payment_method: payment_method.into(),
            sub_category_id: None,
            bill_image: None,
            created_at: Utc::now(),
        }
    }

    /// Create an expense that keeps an existing identifier (import path)
    pub fn with_id(
        id: ExpenseId,
        amount: Money,
        date: NaiveDate,
        payment_method: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(amount, date, payment_method);
        expense.id = id;
        expense
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.payment_method.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyPaymentMethod);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.merchant.as_deref().unwrap_or("(no merchant)"),
            self.amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    EmptyPaymentMethod,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative ({})", amount)
            }
            Self::EmptyPaymentMethod => write!(f, "Payment method cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

mod bill_image {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(image: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match image {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_with_id_keeps_identifier() {
        let id = ExpenseId::new();
        let expense = Expense::with_id(id, Money::from_cents(500), date(2026, 1, 2), "Card");
        assert_eq!(expense.id, id);
        assert_eq!(expense.payment_method, "Card");
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(Money::from_cents(-1), date(2026, 1, 2), "Cash");
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));

        expense.amount = Money::zero();
        expense.payment_method = " ".into();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyPaymentMethod));
    }

    #[test]
    fn test_bill_image_serializes_as_base64() {
        let mut expense = Expense::new(Money::from_cents(100), date(2026, 1, 2), "Cash");
        expense.bill_image = Some(vec![0xde, 0xad, 0xbe, 0xef]);

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["bill_image"], "3q2+7w==");

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back.bill_image, Some(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let expense = Expense::new(Money::from_cents(100), date(2026, 1, 2), "Cash");
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("bill_image").is_none());
        assert!(json.get("note").is_none());

        let back: Expense = serde_json::from_value(json).unwrap();
        assert!(back.bill_image.is_none());
        assert!(back.merchant.is_none());
    }
}
