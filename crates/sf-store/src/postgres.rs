//! Postgres migration history store

use crate::error::{StoreError, StoreResult};
use crate::traits::{MigrationRecord, MigrationStore, HISTORY_TABLE};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

/// Postgres-backed history store reading the applier's database
pub struct PostgresStore {
    url: String,
    pool: Option<PgPool>,
}

impl PostgresStore {
    /// Create a store for a connection string; connection is deferred to
    /// [`connect`](MigrationStore::connect)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: None,
        }
    }

    fn pool(&self) -> StoreResult<&PgPool> {
        self.pool.as_ref().ok_or(StoreError::StoreNotConnected)
    }
}

#[async_trait]
impl MigrationStore for PostgresStore {
    async fn connect(&mut self) -> StoreResult<()> {
        log::debug!("opening postgres history store");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&self.url)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        self.pool = Some(pool);
        Ok(())
    }

    async fn disconnect(&mut self) -> StoreResult<()> {
        if let Some(pool) = self.pool.take() {
            pool.close().await;
        }
        Ok(())
    }

    async fn history_table_exists(&self) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(HISTORY_TABLE)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Ok(exists)
    }

    async fn migration_by_name(&self, name: &str) -> StoreResult<Option<MigrationRecord>> {
        let row = sqlx::query(&format!(
            "SELECT id, migration_name, applied_steps_count FROM {} WHERE migration_name = $1",
            HISTORY_TABLE
        ))
        .bind(name)
        .fetch_optional(self.pool()?)
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(row.map(|row| MigrationRecord {
            id: row.get("id"),
            migration_name: row.get("migration_name"),
            applied_steps_count: i64::from(row.get::<i32, _>("applied_steps_count")),
        }))
    }

    fn provider(&self) -> &'static str {
        "postgresql"
    }
}
