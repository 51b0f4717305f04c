//! Migration history store trait

use crate::error::StoreResult;
use async_trait::async_trait;

/// Name of the history table maintained by the external applier
pub const HISTORY_TABLE: &str = "_prisma_migrations";

/// One row of the migration history table, read-only to this tool
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationRecord {
    pub id: String,
    pub migration_name: String,
    pub applied_steps_count: i64,
}

/// Read-only access to the external store's migration history.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait MigrationStore: Send + Sync {
    /// Establish the store connection
    async fn connect(&mut self) -> StoreResult<()>;

    /// Tear down the store connection
    async fn disconnect(&mut self) -> StoreResult<()>;

    /// Check whether the history table exists.
    /// It is created by the first-ever apply, so absence is not an error.
    async fn history_table_exists(&self) -> StoreResult<bool>;

    /// Fetch the history record for a named migration
    async fn migration_by_name(&self, name: &str) -> StoreResult<Option<MigrationRecord>>;

    /// Store backend identifier for logging
    fn provider(&self) -> &'static str;

    /// Applied-step counter for a named migration; 0 when the history
    /// table does not exist yet or carries no row for the name
    async fn applied_steps(&self, name: &str) -> StoreResult<i64> {
        if !self.history_table_exists().await? {
            return Ok(0);
        }

        Ok(self
            .migration_by_name(name)
            .await?
            .map(|record| record.applied_steps_count)
            .unwrap_or(0))
    }
}
