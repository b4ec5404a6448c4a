//! Receipt extraction display

use crate::receipt::ReceiptFields;

/// Format the fields found on a receipt
pub fn format_receipt_fields(fields: &ReceiptFields, symbol: &str) -> String {
    let missing = "(not found)".to_string();

    let amount = fields
        .amount
        .map(|a| a.format_with_symbol(symbol))
        .unwrap_or_else(|| missing.clone());
    let date = fields
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| missing.clone());

    let mut output = String::new();
    output.push_str(&format!("Amount:    {}\n", amount));
    output.push_str(&format!("Date:      {}\n", date));
    output.push_str(&format!(
        "Merchant:  {}\n",
        fields.merchant.as_ref().unwrap_or(&missing)
    ));
    output.push_str(&format!(
        "Category:  {}\n",
        fields.suggested_category.as_ref().unwrap_or(&missing)
    ));
    output
}
