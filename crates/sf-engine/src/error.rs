//! Error types for sf-engine

use thiserror::Error;

/// External tool invocation errors
#[derive(Error, Debug)]
pub enum ToolError {
    /// T001: Command could not be spawned
    #[error("[T001] Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// T002: Command exited non-zero
    #[error("[T002] Command '{command}' exited with code {code}")]
    ExitError { command: String, code: i32 },
}

/// Result type alias for ToolError
pub type ToolResult<T> = Result<T, ToolError>;

/// Engine error type for staging, orchestration, and generation
#[derive(Error, Debug)]
pub enum EngineError {
    /// M001: Target migration not present in the set
    #[error("[M001] Migration {name} not found")]
    TargetNotFound { name: String },

    /// M002: Moving a unit into the staging area failed
    #[error("[M002] Error moving {unit} to staging area {staging_dir}: {source}")]
    StagingFailed {
        unit: String,
        staging_dir: String,
        source: std::io::Error,
    },

    /// M003: Moving a staged unit back failed; the migrations directory is
    /// inconsistent and needs manual recovery from the staging area
    #[error("[M003] Error moving {unit} back from staging area {staging_dir}: {source}")]
    RestoreFailed {
        unit: String,
        staging_dir: String,
        source: std::io::Error,
    },

    /// M004: Staging area still holds entries after restoration
    #[error("[M004] Staging area {path} is not empty after restoration, refusing to delete it")]
    StagingAreaNotEmpty { path: String },

    /// M005: Leftover staging area from a previous run
    #[error("[M005] Staging area {path} already contains entries, likely left by a crashed run; restore or remove them before retrying")]
    StaleStagingArea { path: String },

    /// M006: Migration has no post-script
    #[error("[M006] Migration {name} does not have a post script")]
    MissingPostScript { name: String },

    /// M007: Post-script command could not be launched
    #[error("[M007] Failed to launch post script '{command}': {source}")]
    ScriptLaunch {
        command: String,
        source: std::io::Error,
    },

    /// M008: Post-script exited non-zero
    #[error("[M008] Post script '{command}' exited with code {code}")]
    ScriptFailed { command: String, code: i32 },

    /// M009: IO error with path context
    #[error("[M009] IO error at '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// M010: Client generation failed for one migration
    #[error("[M010] Failed to generate client for migration {migration}: {source}")]
    Generation {
        migration: String,
        source: Box<EngineError>,
    },

    /// Core error passthrough
    #[error(transparent)]
    Core(#[from] sf_core::CoreError),

    /// Schema error passthrough
    #[error(transparent)]
    Schema(#[from] sf_schema::SchemaError),

    /// Store error passthrough
    #[error(transparent)]
    Store(#[from] sf_store::StoreError),

    /// Tool error passthrough
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
