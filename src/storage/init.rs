//! Storage initialization
//!
//! Handles first-run setup and the default category tree

use tracing::info;

use crate::config::paths::ClearSpendPaths;
use crate::config::settings::Settings;
use crate::error::ClearSpendError;
use crate::models::{Category, SubCategory};

use super::{LedgerStore, Storage};

/// Default categories: (name, icon, colour, sub-categories)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "Food & Dining",
        "fork.knife",
        "#FF7043",
        &["Groceries", "Restaurants", "Coffee", "Fast Food"],
    ),
    (
        "Transport",
        "car.fill",
        "#42A5F5",
        &["Fuel", "Public Transport", "Cab", "Parking"],
    ),
    (
        "Housing",
        "house.fill",
        "#66BB6A",
        &["Rent", "Utilities", "Maintenance", "Internet"],
    ),
    (
        "Lifestyle",
        "bag.fill",
        "#AB47BC",
        &["Shopping", "Subscriptions", "Entertainment"],
    ),
    (
        "Health",
        "heart.fill",
        "#EF5350",
        &["Medical", "Insurance", "Fitness"],
    ),
    (
        "Travel",
        "airplane",
        "#26C6DA",
        &["Flights", "Hotels", "Local Travel"],
    ),
    ("Education", "book.fill", "#FFA726", &["Courses", "Books"]),
    (
        "Miscellaneous",
        "ellipsis.circle.fill",
        "#BDBDBD",
        &["Other"],
    ),
];

/// Initialize storage for a fresh installation
///
/// Creates directories, seeds the default categories when the store has
/// none, and marks setup as completed in the settings file.
pub fn initialize_storage(paths: &ClearSpendPaths) -> Result<Storage, ClearSpendError> {
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let seeded = seed_default_categories(&storage)?;
    if seeded > 0 {
        storage.save()?;
    }

    let mut settings = Settings::load_or_create(paths)?;
    if !settings.setup_completed {
        settings.setup_completed = true;
        settings.save(paths)?;
    }

    Ok(storage)
}

/// Insert the default category tree if no category exists yet
///
/// Returns the number of categories created. Does not commit.
pub fn seed_default_categories<S: LedgerStore>(store: &S) -> Result<usize, ClearSpendError> {
    let existing: Vec<Category> = store.fetch(|_: &Category| true)?;
    if !existing.is_empty() {
        return Ok(0);
    }

    for (i, (name, icon, color, subs)) in DEFAULT_CATEGORIES.iter().enumerate() {
        let mut category = Category::new(*name, *icon, *color);
        category.sort_order = i as i32;

        for (j, sub_name) in subs.iter().enumerate() {
            let mut sub = SubCategory::new(*sub_name, Some(category.id));
            sub.sort_order = j as i32;
            category.attach_sub_category(sub.id);
            store.insert(sub)?;
        }

        store.insert(category)?;
    }

    info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    Ok(DEFAULT_CATEGORIES.len())
}
