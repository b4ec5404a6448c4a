//! Category display formatting
//!
//! Formats the category tree for terminal output.

use crate::services::category::CategoryWithSubCategories;

/// Format categories as a tree with their sub-categories
pub fn format_category_tree(categories: &[CategoryWithSubCategories]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'clearspend category seed' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();

    for (i, cws) in categories.iter().enumerate() {
        output.push_str(&format!(
            "{} [{}, {}]  {}\n",
            cws.category.name,
            cws.category.icon,
            cws.category.color_hex,
            cws.category.id
        ));

        if cws.sub_categories.is_empty() {
            output.push_str("  (no sub-categories)\n");
        } else {
            for (j, sub) in cws.sub_categories.iter().enumerate() {
                let is_last = j == cws.sub_categories.len() - 1;
                let prefix = if is_last { "└── " } else { "├── " };
                output.push_str(&format!("  {}{}\n", prefix, sub.name));
            }
        }

        if i < categories.len() - 1 {
            output.push('\n');
        }
    }

    output
}
