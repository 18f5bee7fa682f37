//! Configuration and application-level errors

pub mod config;
pub mod error;

pub use config::KioskConfig;
pub use error::{KioskError, KioskResult};
