//! CLI command handlers for CSV import and export
//!
//! Export writes the exchange format to a file (by default the configured
//! export file name) or stdout; import reads it back, skipping expenses that
//! already exist.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::codec::write_expenses_csv;
use crate::config::settings::Settings;
use crate::error::{ClearSpendError, ClearSpendResult};
use crate::services::ImportService;
use crate::storage::LedgerStore;

/// Handle the import command
pub fn handle_import_command<S: LedgerStore>(store: &S, file: &Path) -> ClearSpendResult<()> {
    let summary = ImportService::new(store).import_file(file)?;

    println!("Import complete");
    println!("{}", "=".repeat(40));
    println!("  Imported:           {}", summary.imported);
    println!("  Duplicates (skip):  {}", summary.duplicates);
    if summary.skipped > 0 {
        println!("  Unreadable rows:    {}", summary.skipped);
    }

    Ok(())
}

/// Where an export goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    /// `-` means stdout; no path means the configured export file name
    pub fn resolve(output: Option<PathBuf>, settings: &Settings) -> Self {
        match output {
            Some(path) if path.as_os_str() == "-" => Self::Stdout,
            Some(path) => Self::File(path),
            None => Self::File(PathBuf::from(&settings.export_file_name)),
        }
    }
}

/// Handle the export command
pub fn handle_export_command<S: LedgerStore>(
    store: &S,
    settings: &Settings,
    output: Option<PathBuf>,
) -> ClearSpendResult<()> {
    match ExportTarget::resolve(output, settings) {
        ExportTarget::File(path) => {
            let file = File::create(&path).map_err(|e| {
                ClearSpendError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            let count = write_expenses_csv(store, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ClearSpendError::Export(e.to_string()))?;

            println!("Exported {} expenses to {}", count, path.display());
        }
        ExportTarget::Stdout => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_expenses_csv(store, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ClearSpendError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::storage::testing::create_test_storage;

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let (source_dir, source) = create_test_storage();
        let (_target_dir, target) = create_test_storage();

        let csv = "id,date,amount,payment_method,category,subcategory,merchant,note\n\
                   3f2b8c1e-0d4a-4c5e-9b1a-2e7f6d8c9a01,2026-03-15,12.50,Card,Food,Coffee,Cafe,\n";
        ImportService::new(&source).import_csv(csv).unwrap();

        let path = source_dir.path().join("out.csv");
        handle_export_command(&source, &Settings::default(), Some(path.clone())).unwrap();

        handle_import_command(&target, &path).unwrap();
        assert_eq!(target.fetch(|_: &Expense| true).unwrap().len(), 1);

        // Second import adds nothing
        handle_import_command(&target, &path).unwrap();
        assert_eq!(target.fetch(|_: &Expense| true).unwrap().len(), 1);
    }

    #[test]
    fn test_export_target() {
        let mut settings = Settings::default();
        settings.export_file_name = "march.csv".into();

        assert_eq!(
            ExportTarget::resolve(None, &settings),
            ExportTarget::File(PathBuf::from("march.csv"))
        );
        assert_eq!(
            ExportTarget::resolve(Some(PathBuf::from("-")), &settings),
            ExportTarget::Stdout
        );
        assert_eq!(
            ExportTarget::resolve(Some(PathBuf::from("out/all.csv")), &settings),
            ExportTarget::File(PathBuf::from("out/all.csv"))
        );
    }

    #[test]
    fn test_import_missing_file() {
        let (temp_dir, storage) = create_test_storage();
        let err = handle_import_command(&storage, &temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ClearSpendError::Import(_)));
    }
}
