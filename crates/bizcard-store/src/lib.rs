//! SQLite record store for scanned business cards.
//!
//! Every operation opens its own connection and runs inside one transaction
//! that is committed on success and rolled back on failure. The connection is
//! closed when the operation returns. All values are bound as parameters.

mod cards;
mod error;
mod migrations;

pub use error::{Result, StoreError};

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction};
use tracing::{debug, error, info, warn};

/// Handle to the card database file.
#[derive(Debug, Clone)]
pub struct CardStore {
    db_path: PathBuf,
}

impl CardStore {
    /// Open (creating if needed) the database at `db_path` and ensure the
    /// schema exists.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { db_path };
        store.create_schema_if_absent()?;

        info!("Card store ready at {}", store.db_path.display());

        Ok(store)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Create the card table if it does not exist yet. Idempotent.
    pub fn create_schema_if_absent(&self) -> Result<()> {
        let mut conn = self.connect()?;
        migrations::run_migrations(&mut conn)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Run `task` in a fresh transaction, committing on success and rolling
    /// back explicitly on failure.
    fn with_transaction<T, F>(&self, operation: &str, task: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        match task(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!("{} committed", operation);
                Ok(value)
            }
            Err(err) => {
                warn!("{} failed, rolling back: {}", operation, err);
                if let Err(rollback_err) = tx.rollback() {
                    error!("Rollback after failed {} also failed: {}", operation, rollback_err);
                }
                Err(err)
            }
        }
    }
}
