//! Error types for sf-schema

use thiserror::Error;

/// Schema parsing and transform errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// S001: Schema source could not be parsed
    #[error("[S001] Schema parse error: {message}")]
    Parse { message: String },

    /// S002: No client generator block in the schema
    #[error("[S002] The schema must contain a generator block for prisma-client-js")]
    MissingGenerator,

    /// S003: More than one client generator block in the schema
    #[error("[S003] The schema must contain exactly one generator block for prisma-client-js")]
    AmbiguousGenerator,

    /// S004: Datasource block missing, duplicated, or malformed
    #[error("[S004] Invalid datasource: {reason}")]
    InvalidDatasource { reason: String },

    /// S005: Datasource provider is not supported
    #[error("[S005] Unsupported datasource provider: {provider}")]
    UnsupportedProvider { provider: String },

    /// S006: SQLite connection string is not a file: URL
    #[error("[S006] Invalid SQLite URL format, expected to start with 'file:': {url}")]
    InvalidSqliteUrl { url: String },

    /// S007: env() reference to an unset environment variable
    #[error("[S007] Environment variable '{name}' referenced by env() is not set")]
    EnvVarMissing { name: String },

    /// S008: IO error with file path context
    #[error("[S008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for SchemaError
pub type SchemaResult<T> = Result<T, SchemaError>;
