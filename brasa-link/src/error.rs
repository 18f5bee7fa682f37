//! Error types for the link library

use thiserror::Error;

/// Link error types
#[derive(Debug, Error)]
pub enum LinkError {
    /// The URL handler process could not be started
    #[error("Failed to launch URL handler: {0}")]
    Launch(#[from] std::io::Error),

    /// The URL handler exited with a failure status
    #[error("URL handler failed: {0}")]
    Handler(String),

    /// Invalid link configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;
