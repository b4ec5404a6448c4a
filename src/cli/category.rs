//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_tree;
use crate::error::{ClearSpendError, ClearSpendResult};
use crate::services::CategoryService;
use crate::storage::LedgerStore;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with their sub-categories
    List,

    /// Create the default category tree (only when there are no categories)
    Seed,

    /// Delete a category and its sub-categories
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command<S: LedgerStore>(
    store: &S,
    cmd: CategoryCommands,
) -> ClearSpendResult<()> {
    let service = CategoryService::new(store);

    match cmd {
        CategoryCommands::List => {
            let tree = service.list_with_sub_categories()?;
            print!("{}", format_category_tree(&tree));
        }

        CategoryCommands::Seed => {
            let created = service.seed_defaults()?;
            if created == 0 {
                println!("Categories already exist; nothing seeded.");
            } else {
                println!("Seeded {} default categories.", created);
            }
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| ClearSpendError::category_not_found(&category))?;

            let affected = service.delete_category(found.id)?;
            println!("Deleted category: {}", found.name);
            if affected > 0 {
                println!("{} expense(s) are now uncategorized.", affected);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::testing::create_test_storage;

    #[test]
    fn test_seed_then_delete() {
        let (_temp_dir, storage) = create_test_storage();

        handle_category_command(&storage, CategoryCommands::Seed).unwrap();
        let before = storage.fetch(|_: &Category| true).unwrap().len();
        assert!(before > 0);

        handle_category_command(
            &storage,
            CategoryCommands::Delete {
                category: "Lifestyle".into(),
            },
        )
        .unwrap();
        assert_eq!(storage.fetch(|_: &Category| true).unwrap().len(), before - 1);

        let err = handle_category_command(
            &storage,
            CategoryCommands::Delete {
                category: "Lifestyle".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
