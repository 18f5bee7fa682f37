//! Cart Model

use super::MenuItem;
use serde::{Deserialize, Serialize};

/// Cart entry - a menu item plus the selected quantity and note
///
/// The menu fields are flattened so a stored entry reads like the menu item
/// with `quantity` and `specialInstructions` added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    /// Always >= 1 while the entry is in a cart
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartItem {
    /// New entry with quantity 1 and no note
    pub fn new(item: MenuItem) -> Self {
        Self {
            item,
            quantity: 1,
            special_instructions: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn price(&self) -> f64 {
        self.item.price
    }
}
