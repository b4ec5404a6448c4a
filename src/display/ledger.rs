//! Ledger display formatting

use crate::models::MonthLedger;
use crate::services::ledger::LedgerSummary;

use super::expense::format_expense_register;

/// Format the list of month ledgers
pub fn format_ledger_list(ledgers: &[MonthLedger]) -> String {
    if ledgers.is_empty() {
        return "No ledgers yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:8} {:>9}\n", "Month", "Expenses"));
    output.push_str(&"-".repeat(18));
    output.push('\n');

    for ledger in ledgers {
        output.push_str(&format!("{:8} {:>9}\n", ledger.to_string(), ledger.expense_ids.len()));
    }

    output
}

/// Format a monthly summary
pub fn format_ledger_summary(summary: &LedgerSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Ledger {}\n", summary.ledger));
    output.push_str(&format!(
        "Total spent:   {}\n",
        summary.total.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Expenses:      {}\n", summary.count));
    output.push_str(&format!(
        "Daily average: {}\n",
        summary.average_daily.format_with_symbol(symbol)
    ));

    if !summary.top_categories.is_empty() {
        output.push_str("\nTop categories:\n");
        for (name, amount) in &summary.top_categories {
            output.push_str(&format!(
                "  {:24} {:>12}\n",
                name,
                amount.format_with_symbol(symbol)
            ));
        }
    }

    output.push_str("\nRecent:\n");
    output.push_str(&format_expense_register(&summary.recent, symbol));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_ledger_list() {
        let mut march = MonthLedger::new(2026, 3);
        march.expense_ids.push(crate::models::ExpenseId::new());

        let output = format_ledger_list(&[march, MonthLedger::new(2026, 2)]);
        assert!(output.contains("2026-03          1"));
        assert!(output.contains("2026-02          0"));
    }

    #[test]
    fn test_summary() {
        let summary = LedgerSummary {
            ledger: MonthLedger::new(2026, 3),
            total: Money::from_cents(8000),
            count: 2,
            average_daily: Money::from_cents(258),
            top_categories: vec![("Food".into(), Money::from_cents(8000))],
            recent: vec![],
        };

        let output = format_ledger_summary(&summary, "$");
        assert!(output.starts_with("Ledger 2026-03\n"));
        assert!(output.contains("Total spent:   $80.00"));
        assert!(output.contains("Daily average: $2.58"));
        assert!(output.contains("Food"));
        assert!(output.contains("No expenses found."));
    }
}
