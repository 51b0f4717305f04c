//! sf-store - Migration history store abstraction for Stepflow
//!
//! This crate provides the `MigrationStore` trait and implementations
//! for SQLite and Postgres, matching the datasource providers the
//! external applier supports.

pub mod error;
pub mod postgres;
pub mod sqlite;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;
pub use traits::{MigrationRecord, MigrationStore, HISTORY_TABLE};

use sf_schema::{sqlite_url_to_path, Provider, ResolvedDatasource};
use std::path::Path;

/// Build the history store matching a resolved datasource.
///
/// SQLite connection strings are `file:` URLs resolved against the
/// canonical schema's directory; Postgres strings pass through unchanged.
pub fn store_for(
    datasource: &ResolvedDatasource,
    main_schema: &Path,
) -> StoreResult<Box<dyn MigrationStore>> {
    match datasource.provider {
        Provider::Sqlite => {
            let path = sqlite_url_to_path(&datasource.url, main_schema)
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
            Ok(Box::new(SqliteStore::new(&path)))
        }
        Provider::Postgresql => Ok(Box::new(PostgresStore::new(datasource.url.clone()))),
    }
}
