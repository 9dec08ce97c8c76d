use thiserror::Error;

use crate::database::DatabaseError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl RepositoryError {
    /// Translate SQLite constraint violations into validation errors.
    /// Unique-column collisions (username, email) land here.
    pub(crate) fn from_sqlite(error: rusqlite::Error, what: &str) -> Self {
        match &error {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::Validation(format!("{what} violates a uniqueness constraint"))
            }
            _ => RepositoryError::Sqlite(error),
        }
    }
}
