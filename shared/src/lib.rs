//! Shared types for the Brasa ordering kiosk
//!
//! Data model used by the kiosk application and the link crate: menu
//! entries, cart entries, order records and the customer profile that is
//! persisted between sessions.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CartItem, Category, CustomerData, CustomerProfile, MenuItem, NewAddress, OrderRecord,
    OrderStatus, OrderType, PaymentMethod, SavedAddress,
};
