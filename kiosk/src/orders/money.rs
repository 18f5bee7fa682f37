//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored as `f64` (the persisted record shape). All arithmetic is
//! done in `Decimal` and converted back rounded to 2 decimal places.

use rust_decimal::prelude::*;
use shared::CartItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// price × quantity
pub fn line_subtotal(item: &CartItem) -> Decimal {
    to_decimal(item.price()) * Decimal::from(item.quantity)
}

/// Σ line subtotals
pub fn items_total<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Decimal {
    items.into_iter().map(line_subtotal).sum()
}

/// Currency string used in screens and messages, e.g. `S/ 25.00`
pub fn format_soles(amount: f64) -> String {
    format_soles_decimal(to_decimal(amount))
}

pub fn format_soles_decimal(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("S/ {:.2}", rounded)
}
