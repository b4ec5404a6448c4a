//! Expense display formatting
//!
//! Register rows and detail views for expenses.

use crate::models::Expense;

use super::truncate;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    let merchant = expense.merchant.as_deref().unwrap_or("(no merchant)");

    format!(
        "{:12} {} {:24} {:>12} {}",
        expense.id.short(),
        expense.date.format("%Y-%m-%d"),
        truncate(merchant, 24),
        expense.amount.format_with_symbol(symbol),
        expense.payment_method
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:24} {:>12} {}\n",
        "ID", "Date", "Merchant", "Amount", "Paid with"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol));
        output.push('\n');
    }

    output
}

/// Format expense details
///
/// `classification` is the "Category / Sub-category" label, if any.
pub fn format_expense_details(
    expense: &Expense,
    classification: Option<&str>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Paid with:   {}\n", expense.payment_method));

    if let Some(merchant) = &expense.merchant {
        output.push_str(&format!("Merchant:    {}\n", merchant));
    }

    match classification {
        Some(label) => output.push_str(&format!("Category:    {}\n", label)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:        {}\n", note));
    }

    if let Some(image) = &expense.bill_image {
        output.push_str(&format!("Bill image:  {} bytes\n", image.len()));
    }

    output
}
