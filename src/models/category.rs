//! Category and SubCategory models
//!
//! A category owns an ordered list of sub-categories. Expenses point at a
//! sub-category; the category is reached through the sub-category's
//! back-reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, SubCategoryId};

/// Icon given to categories created on the fly (e.g. by import)
pub const DEFAULT_CATEGORY_ICON: &str = "tag";

/// Colour given to categories created on the fly
pub const DEFAULT_CATEGORY_COLOR: &str = "#2563EB";

/// A top-level spending category (e.g. "Food & Dining")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Category name, the natural key used by resolution (case-sensitive)
    pub name: String,

    /// Symbolic icon reference
    pub icon: String,

    /// Chart colour as "#RRGGBB"
    pub color_hex: String,

    /// Owned sub-categories, in display order
    #[serde(default)]
    pub sub_category_ids: Vec<SubCategoryId>,

    /// Sort order for listings
    #[serde(default)]
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with the given presentation attributes
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color_hex: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: icon.into(),
            color_hex: color_hex.into(),
            sub_category_ids: Vec::new(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a category with the generic icon and colour
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_CATEGORY_ICON, DEFAULT_CATEGORY_COLOR)
    }

    /// Append a sub-category to the owned list (no-op if already present)
    pub fn attach_sub_category(&mut self, id: SubCategoryId) {
        if !self.sub_category_ids.contains(&id) {
            self.sub_category_ids.push(id);
        }
    }

    /// Validate a manually entered category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        let hex = self.color_hex.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CategoryValidationError::InvalidColor(self.color_hex.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A sub-category within exactly one category (or orphaned)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,

    pub name: String,

    /// Owning category
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub sort_order: i32,
}

impl SubCategory {
    pub fn new(name: impl Into<String>, category_id: Option<CategoryId>) -> Self {
        Self {
            id: SubCategoryId::new(),
            name: name.into(),
            category_id,
            sort_order: 0,
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Category colour must look like #RRGGBB, got '{}'", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults() {
        let category = Category::with_defaults("Imported");
        assert_eq!(category.icon, "tag");
        assert_eq!(category.color_hex, "#2563EB");
        assert!(category.sub_category_ids.is_empty());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_attach_sub_category_is_idempotent() {
        let mut category = Category::with_defaults("Food");
        let sub = SubCategory::new("Coffee", Some(category.id));

        category.attach_sub_category(sub.id);
        category.attach_sub_category(sub.id);

        assert_eq!(category.sub_category_ids, vec![sub.id]);
    }

    #[test]
    fn test_validation() {
        let mut category = Category::with_defaults("   ");
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Food".into();
        category.color_hex = "blue".into();
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Travel", "airplane", "#26C6DA");
        let json = serde_json::to_string(&category).unwrap();
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, category.id);
        assert_eq!(back.icon, "airplane");
    }
}
