//! Error types for sf-core

use thiserror::Error;

/// Core error type for Stepflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Migrations directory not found
    #[error("[C004] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C005: Named migration does not exist in the migration set
    #[error("[C005] Migration with name {name} does not exist")]
    UnknownMigration { name: String },

    /// C006: IO error
    #[error("[C006] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C007: IO error with file path context
    #[error("[C007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C008: Directory entry with a non-UTF-8 name
    #[error("[C008] Non-UTF-8 entry name in directory: {path}")]
    NonUtf8Entry { path: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
