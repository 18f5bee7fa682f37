//! Data models
//!
//! Persisted structs serialize with camelCase keys; the stored customer
//! record keeps the same shape across versions.

pub mod cart;
pub mod customer;
pub mod menu;
pub mod order;

// Re-exports
pub use cart::*;
pub use customer::*;
pub use menu::*;
pub use order::*;
