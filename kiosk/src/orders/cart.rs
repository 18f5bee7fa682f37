//! Cart Model
//!
//! Ordered list of selected menu entries. Entry ids are unique and every
//! stored quantity is >= 1; totals are derived on every read.

use super::money;
use shared::{CartItem, MenuItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart holding exactly these entries (e.g. a past order being reordered)
    ///
    /// Entries with quantity 0 are dropped and repeated ids are merged so the
    /// cart invariants hold even for hand-edited records.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for entry in items {
            if entry.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id() == entry.id()) {
                Some(existing) => existing.quantity += entry.quantity,
                None => cart.items.push(entry),
            }
        }
        cart
    }

    /// Add one unit: bumps the quantity if present, else appends with quantity 1
    pub fn add(&mut self, item: &MenuItem) {
        match self.items.iter_mut().find(|i| i.id() == item.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem::new(item.clone())),
        }
    }

    /// Replace the quantity; 0 removes the entry. Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item_id) {
            existing.quantity = quantity;
        }
    }

    /// Remove one unit (the menu's "-" button)
    pub fn decrement(&mut self, item_id: &str) {
        let current = self.quantity_of(item_id);
        if current > 0 {
            self.set_quantity(item_id, current - 1);
        }
    }

    /// Delete the entry regardless of quantity
    pub fn remove(&mut self, item_id: &str) {
        self.items.retain(|i| i.id() != item_id);
    }

    /// Replace the entry's note; blank text clears it
    pub fn set_instructions(&mut self, item_id: &str, instructions: &str) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item_id) {
            existing.special_instructions = if instructions.trim().is_empty() {
                None
            } else {
                Some(instructions.to_string())
            };
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of one menu entry, 0 when absent
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.get(item_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Σ quantities
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn line_subtotal(&self, item_id: &str) -> f64 {
        self.get(item_id)
            .map(|i| money::to_f64(money::line_subtotal(i)))
            .unwrap_or(0.0)
    }

    /// Σ price × quantity
    pub fn total(&self) -> f64 {
        money::to_f64(money::items_total(&self.items))
    }
}
