//! Error types for the storage layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error (connectivity, timeout, constraint other than the
    /// ones mapped below, malformed query).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The unique index on users.email rejected an insert.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
