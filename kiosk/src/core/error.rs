//! Application error type

use crate::profile::StorageError;
use brasa_link::LinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KioskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// Required fields for the order type are blank
    #[error("Order form is incomplete: missing {0}")]
    IncompleteForm(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type KioskResult<T> = Result<T, KioskError>;
