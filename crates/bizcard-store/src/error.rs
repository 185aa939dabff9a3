//! Error types for the record store.

use thiserror::Error;

/// Errors raised by [`crate::CardStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a card failed; the transaction was rolled back.
    #[error("failed to save card for {name:?}: {source}")]
    Insert {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The database was created by a newer version of this program.
    #[error("database version ({found}) is newer than supported schema ({supported})")]
    SchemaTooNew { found: i32, supported: i32 },
}

impl StoreError {
    /// Whether repeating the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Insert { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
