//! Scoped transactions for multi-statement mutations
//!
//! A `UnitOfWork` wraps one sqlx transaction. `finish` commits when the
//! operation succeeded and rolls back when it failed. If the unit is dropped
//! without `finish` (early return, panic), the inner transaction rolls back on
//! drop. In every case the connection goes back to the pool.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, error, warn};

use crate::Result;

pub struct UnitOfWork<'a> {
    tx: Transaction<'a, Sqlite>,
    label: &'static str,
}

impl<'a> UnitOfWork<'a> {
    /// Acquire a connection and begin a transaction
    pub async fn begin(pool: &'a SqlitePool, label: &'static str) -> Result<Self> {
        let tx = pool.begin().await?;
        debug!("Unit of work '{}' started", label);
        Ok(Self { tx, label })
    }

    /// Connection bound to the open transaction
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commit on `Ok`, roll back on `Err`, and return the outcome
    ///
    /// A failed commit is reported as the operation's error.
    pub async fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        let label = self.label;
        match outcome {
            Ok(value) => {
                self.tx.commit().await.map_err(|e| {
                    error!("Unit of work '{}' failed to commit: {}", label, e);
                    e
                })?;
                debug!("Unit of work '{}' committed", label);
                Ok(value)
            }
            Err(err) => {
                error!("Unit of work '{}' rolled back: {}", label, err);
                if let Err(rollback_err) = self.tx.rollback().await {
                    warn!("Rollback of '{}' failed: {}", label, rollback_err);
                }
                Err(err)
            }
        }
    }
}
