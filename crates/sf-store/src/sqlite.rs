//! SQLite migration history store

use crate::error::{StoreError, StoreResult};
use crate::traits::{MigrationRecord, MigrationStore, HISTORY_TABLE};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed history store reading the applier's database file
pub struct SqliteStore {
    path: PathBuf,
    conn: Option<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a store for a database file; connection is deferred to
    /// [`connect`](MigrationStore::connect)
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            conn: None,
        }
    }

    fn connection(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .as_ref()
            .ok_or(StoreError::StoreNotConnected)?
            .lock()
            .map_err(|e| StoreError::MutexPoisoned(e.to_string()))
    }
}

#[async_trait]
impl MigrationStore for SqliteStore {
    async fn connect(&mut self) -> StoreResult<()> {
        log::debug!("opening history store at {}", self.path.display());
        let conn = Connection::open(&self.path)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        self.conn = Some(Mutex::new(conn));
        Ok(())
    }

    async fn disconnect(&mut self) -> StoreResult<()> {
        self.conn = None;
        Ok(())
    }

    async fn history_table_exists(&self) -> StoreResult<bool> {
        let conn = self.connection()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [HISTORY_TABLE],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Ok(count > 0)
    }

    async fn migration_by_name(&self, name: &str) -> StoreResult<Option<MigrationRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT id, migration_name, applied_steps_count FROM {} WHERE migration_name = ?1",
                HISTORY_TABLE
            ))
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query_map([name], |row| {
                Ok(MigrationRecord {
                    id: row.get(0)?,
                    migration_name: row.get(1)?,
                    applied_steps_count: row.get(2)?,
                })
            })
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        match rows.next() {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => Err(StoreError::QueryFailed(e.to_string())),
            None => Ok(None),
        }
    }

    fn provider(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
