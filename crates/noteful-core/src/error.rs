//! Error types for noteful.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using noteful's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for noteful operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
