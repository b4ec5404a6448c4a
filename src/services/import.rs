//! CSV Import service
//!
//! Materializes expenses from the exchange format produced by export.
//! Rows are matched on the expense id, so re-importing a file adds nothing.
//! Categories, sub-categories, and month ledgers named by a row are
//! resolved or created on the way. Everything is committed once at the end.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::codec::{parse_rows, HEADER};
use crate::error::ImportError;
use crate::models::{Expense, ExpenseId, Money, UNKNOWN_PAYMENT_METHOD};
use crate::storage::LedgerStore;

use super::resolver::EntityResolver;

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of expenses created
    pub imported: usize,
    /// Rows whose id was already in the store or earlier in the file
    pub duplicates: usize,
    /// Rows that were too short or had an unreadable id
    pub skipped: usize,
}

/// Service for CSV import
pub struct ImportService<'a, S: LedgerStore> {
    store: &'a S,
    today: NaiveDate,
}

impl<'a, S: LedgerStore> ImportService<'a, S> {
    /// Create a new import service; unreadable dates fall back to today
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            today: Local::now().date_naive(),
        }
    }

    /// Use a fixed date as the fallback for unreadable dates
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Read a CSV file and import it
    pub fn import_file(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ImportError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => ImportError::FileReadFailed(e.to_string()),
        })?;

        let text = String::from_utf8(bytes)
            .map_err(|e| ImportError::FileReadFailed(format!("file is not UTF-8: {}", e)))?;

        self.import_csv(&text)
    }

    /// Import CSV text
    ///
    /// Fails without touching the store if the header is unusable. Bad rows
    /// are skipped; bad dates and amounts fall back to defaults. If the final
    /// commit fails, the whole import fails.
    pub fn import_csv(&self, text: &str) -> Result<ImportSummary, ImportError> {
        let rows = parse_rows(text);

        if rows.len() < 2 {
            return Err(ImportError::InvalidFormat(
                "expected a header row and at least one data row".into(),
            ));
        }

        let header = &rows[0];
        if header.len() < HEADER.len() {
            return Err(ImportError::InvalidFormat(format!(
                "header has {} columns, expected {}",
                header.len(),
                HEADER.len()
            )));
        }
        if !header[0].to_lowercase().contains("id") {
            return Err(ImportError::InvalidFormat(format!(
                "first column should be 'id', found '{}'",
                header[0]
            )));
        }

        let resolver = EntityResolver::new(self.store);
        let mut seen: HashSet<ExpenseId> = HashSet::new();
        let mut summary = ImportSummary::default();

        for (index, fields) in rows.iter().enumerate().skip(1) {
            let row_number = index + 1;

            if fields.len() < HEADER.len() {
                debug!(row = row_number, columns = fields.len(), "skipping short row");
                summary.skipped += 1;
                continue;
            }

            let id = match ExpenseId::parse(&fields[0]) {
                Ok(id) => id,
                Err(_) => {
                    debug!(row = row_number, id = %fields[0], "skipping row with malformed id");
                    summary.skipped += 1;
                    continue;
                }
            };

            if seen.contains(&id) || self.store.get::<Expense>(id)?.is_some() {
                debug!(row = row_number, expense = %id, "skipping duplicate");
                summary.duplicates += 1;
                continue;
            }
            seen.insert(id);

            let date = self.parse_date(&fields[1], row_number);
            let amount = parse_amount(&fields[2], row_number);

            let payment_method = match fields[3].as_str() {
                "" => UNKNOWN_PAYMENT_METHOD,
                method => method,
            };

            let mut expense = Expense::with_id(id, amount, date, payment_method);
            expense.merchant = non_empty(&fields[6]);
            expense.note = non_empty(&fields[7]);

            if !fields[4].is_empty() {
                let category = resolver.resolve_category(&fields[4])?;
                let sub_category = resolver.resolve_sub_category(&fields[5], &category)?;
                expense.sub_category_id = Some(sub_category.id);
            }

            let mut ledger = resolver.resolve_ledger(date)?;
            ledger.attach(expense.id);

            self.store.insert(expense)?;
            self.store.insert(ledger)?;
            summary.imported += 1;
        }

        self.store.save()?;

        info!(
            imported = summary.imported,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "CSV import finished"
        );

        Ok(summary)
    }

    fn parse_date(&self, text: &str, row_number: usize) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap_or_else(|_| {
            warn!(row = row_number, value = text, "unreadable date, using today");
            self.today
        })
    }
}

fn parse_amount(text: &str, row_number: usize) -> Money {
    match Money::parse(text) {
        Ok(amount) if !amount.is_negative() => amount,
        _ => {
            warn!(row = row_number, value = text, "unreadable amount, using 0");
            Money::zero()
        }
    }
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::export;
    use crate::models::{Category, MonthLedger, SubCategory};
    use crate::storage::testing::{create_test_storage, FailingStore};

    const HEADER_LINE: &str = "id,date,amount,payment_method,category,subcategory,merchant,note";
    const ID_A: &str = "3f2c8a8e-6f1d-4c5b-9a57-0c1e2d3f4a5b";
    const ID_B: &str = "9b1d2c3e-4f5a-4b6c-8d7e-1f2a3b4c5d6e";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER_LINE);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_import_creates_ledger_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());

        let text = csv(&[&format!("{},2026-03-15,12.50,Card,Food,Coffee,Cafe,", ID_A)]);
        let summary = service.import_csv(&text).unwrap();
        assert_eq!(summary.imported, 1);

        let ledgers: Vec<MonthLedger> = storage.fetch(|_: &MonthLedger| true).unwrap();
        assert_eq!(ledgers.len(), 1);
        assert_eq!((ledgers[0].year, ledgers[0].month), (2026, 3));

        let id = ExpenseId::parse(ID_A).unwrap();
        assert_eq!(ledgers[0].expense_ids, vec![id]);

        let expense = storage.get::<Expense>(id).unwrap().unwrap();
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.merchant.as_deref(), Some("Cafe"));
        assert!(expense.note.is_none());
    }

    #[test]
    fn test_import_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[
            &format!("{},2026-03-15,12.50,Card,Food,Coffee,,", ID_A),
            &format!("{},2026-04-01,3.00,Cash,,,,", ID_B),
        ]);

        let first = service.import_csv(&text).unwrap();
        let second = service.import_csv(&text).unwrap();

        assert_eq!(first.imported, 2);
        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicates, 2);
        assert_eq!(storage.expenses.len().unwrap(), 2);
        assert_eq!(storage.categories.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_within_batch_imported_once() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[
            &format!("{},2026-03-15,1.00,Card,,,,first", ID_A),
            &format!("{},2026-03-16,2.00,Card,,,,second", ID_A),
        ]);

        let summary = service.import_csv(&text).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.duplicates, 1);

        let expense = storage
            .get::<Expense>(ExpenseId::parse(ID_A).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(expense.note.as_deref(), Some("first"));
    }

    #[test]
    fn test_malformed_id_row_skipped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[
            "not-a-uuid,2026-03-15,1.00,Card,,,,",
            &format!("{},2026-03-15,2.00,Card,,,,", ID_B),
            "short,row",
        ]);

        let summary = service.import_csv(&text).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                duplicates: 0,
                skipped: 2
            }
        );
    }

    #[test]
    fn test_value_errors_use_defaults() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[
            &format!("{},yesterday,abc,,,,,", ID_A),
            &format!("{},2026-01-02,-5.00,Card,,,,", ID_B),
        ]);

        service.import_csv(&text).unwrap();

        let a = storage.get::<Expense>(ExpenseId::parse(ID_A).unwrap()).unwrap().unwrap();
        assert_eq!(a.date, today());
        assert_eq!(a.amount, Money::zero());
        assert_eq!(a.payment_method, "Unknown");
        assert!(a.sub_category_id.is_none());

        let b = storage.get::<Expense>(ExpenseId::parse(ID_B).unwrap()).unwrap().unwrap();
        assert_eq!(b.amount, Money::zero());
    }

    #[test]
    fn test_crlf_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[
            &format!("{},2026-03-15,1.00,Card,Food,Lunch,,", ID_A),
            &format!("{},2026-03-16,2.00,Card,Food,Lunch,,", ID_B),
        ])
        .replace('\n', "\r\n");

        let summary = service.import_csv(&text).unwrap();
        assert_eq!(summary.imported, 2);

        let subs: Vec<SubCategory> = storage.fetch(|s: &SubCategory| s.name == "Lunch").unwrap();
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_empty_sub_category_resolves_under_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[&format!("{},2026-03-15,1.00,Card,Food,,,", ID_A)]);

        service.import_csv(&text).unwrap();

        let categories: Vec<Category> = storage.fetch(|_: &Category| true).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].sub_category_ids.len(), 1);
    }

    #[test]
    fn test_invalid_header() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let only_header = service.import_csv(HEADER_LINE);
        assert!(matches!(only_header, Err(ImportError::InvalidFormat(_))));

        let narrow = service.import_csv("id,date,amount\n1,2,3\n");
        assert!(matches!(narrow, Err(ImportError::InvalidFormat(_))));

        let wrong_first = service.import_csv(&csv(&["a,b,c,d,e,f,g,h"]).replacen("id,", "key,", 1));
        assert!(matches!(wrong_first, Err(ImportError::InvalidFormat(_))));

        assert!(storage.expenses.is_empty().unwrap());
    }

    #[test]
    fn test_commit_failure_fails_import() {
        let (_temp_dir, storage) = create_test_storage();
        let store = FailingStore(storage);
        let service = ImportService::new(&store).with_today(today());

        let text = csv(&[&format!("{},2026-03-15,1.00,Card,Food,,,", ID_A)]);
        let result = service.import_csv(&text);
        assert!(matches!(result, Err(ImportError::Storage(_))));

        // Nothing from the failed import lingers, so a retry imports the row
        assert!(store.0.expenses.is_empty().unwrap());
        assert!(store.0.categories.is_empty().unwrap());

        let retry = ImportService::new(&store.0)
            .with_today(today())
            .import_csv(&text)
            .unwrap();
        assert_eq!(retry.imported, 1);
        assert_eq!(retry.duplicates, 0);
    }

    #[test]
    fn test_padding_before_quoted_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage).with_today(today());
        let text = csv(&[&format!(
            r#"{}, 2026-03-15, 4.20, Card, "Food, Drink", Coffee, "Cafe, Downtown", "morning""#,
            ID_A
        )]);

        let summary = service.import_csv(&text).unwrap();
        assert_eq!(summary.imported, 1);

        let expense = storage.get::<Expense>(ExpenseId::parse(ID_A).unwrap()).unwrap().unwrap();
        assert_eq!(expense.amount, Money::from_cents(420));
        assert_eq!(expense.merchant.as_deref(), Some("Cafe, Downtown"));
        assert_eq!(expense.note.as_deref(), Some("morning"));

        let sub = storage.get::<SubCategory>(expense.sub_category_id.unwrap()).unwrap().unwrap();
        let category = storage.get::<Category>(sub.category_id.unwrap()).unwrap().unwrap();
        assert_eq!(category.name, "Food, Drink");
        assert_eq!(sub.name, "Coffee");
    }

    #[test]
    fn test_round_trip_through_export() {
        let (_temp_dir, source) = create_test_storage();
        let text = csv(&[
            &format!(
                r#"{},2026-03-15,12.50,Card,"Food, Drink",Coffee,"Joe's, Inc","He said ""hi"", bye""#,
                ID_A
            ),
            &format!("{},2026-04-01,3.00,Cash,,,,", ID_B),
        ]);
        ImportService::new(&source).with_today(today()).import_csv(&text).unwrap();

        let exported = export(&source).unwrap();

        let (_other_dir, target) = create_test_storage();
        let summary = ImportService::new(&target)
            .with_today(today())
            .import_csv(&exported)
            .unwrap();
        assert_eq!(summary.imported, 2);

        let a = target.get::<Expense>(ExpenseId::parse(ID_A).unwrap()).unwrap().unwrap();
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(a.amount, Money::from_cents(1250));
        assert_eq!(a.payment_method, "Card");
        assert_eq!(a.merchant.as_deref(), Some("Joe's, Inc"));
        assert_eq!(a.note.as_deref(), Some(r#"He said "hi", bye"#));

        let sub = target.get::<SubCategory>(a.sub_category_id.unwrap()).unwrap().unwrap();
        assert_eq!(sub.name, "Coffee");
        let category = target.get::<Category>(sub.category_id.unwrap()).unwrap().unwrap();
        assert_eq!(category.name, "Food, Drink");

        assert_eq!(export(&target).unwrap(), exported);
    }

    #[test]
    fn test_import_file_errors() {
        let (temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let missing = service.import_file(&temp_dir.path().join("nope.csv"));
        assert!(matches!(missing, Err(ImportError::FileReadFailed(_))));

        let binary = temp_dir.path().join("binary.csv");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            service.import_file(&binary),
            Err(ImportError::FileReadFailed(_))
        ));
    }
}
