//! Order building: cart model, money math and message composition

pub mod cart;
pub mod composer;
pub mod money;

pub use cart::Cart;
pub use composer::{ComposeOptions, compose_order_message, compose_order_message_in};
pub use money::format_soles;
