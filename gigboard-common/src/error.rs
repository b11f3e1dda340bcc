//! Common error types for Gigboard

use thiserror::Error;

/// Common result type for Gigboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Gigboard crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Write rejected because the row already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored data references something that does not exist
    ///
    /// Raised when a genre link points at a genre id missing from the
    /// reference set. Never swallowed: the seeded data is out of sync.
    #[error("Data integrity violation: {0}")]
    Integrity(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify a failed write
    ///
    /// Unique/primary-key violations become `Conflict`, foreign-key violations
    /// `InvalidInput`, anything else `Database`.
    pub fn from_write(err: sqlx::Error, what: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Error::Conflict(what.into());
            }
            if db_err.is_foreign_key_violation() {
                return Error::InvalidInput(format!(
                    "{}: referenced row does not exist",
                    what.into()
                ));
            }
        }
        Error::Database(err)
    }
}
