//! Menu Catalog
//!
//! Static, ordered list of menu entries grouped by category. Nothing mutates
//! it at runtime.

mod data;

use shared::{Category, MenuItem};

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    items: Vec<MenuItem>,
}

impl Catalog {
    /// The restaurant's built-in menu
    pub fn builtin() -> Self {
        Self {
            categories: data::categories(),
            items: data::menu_items(),
        }
    }

    /// Categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All items in catalog order
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items of one category, in catalog order
    pub fn items_in(&self, category_id: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category == category_id)
            .collect()
    }

    pub fn find(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
