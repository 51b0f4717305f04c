//! Error types for sf-store

use thiserror::Error;

/// Migration history store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// ST01: Query issued before connect()
    #[error("[ST01] Store connection is not established, call connect() first")]
    StoreNotConnected,

    /// ST02: Connection could not be established
    #[error("[ST02] Store connection failed: {0}")]
    ConnectionFailed(String),

    /// ST03: Query execution failed
    #[error("[ST03] Store query failed: {0}")]
    QueryFailed(String),

    /// ST04: Store mutex poisoned
    #[error("[ST04] Store mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;
