//! sf-engine - Targeted migration engine for Stepflow
//!
//! This crate provides the staging engine that limits the external
//! applier's effect to a chosen target, the post-migration orchestrator,
//! the post-script runner, and the per-migration client generation
//! driver.

pub mod error;
pub mod generate;
pub mod orchestrator;
pub mod script;
pub mod staging;
pub mod tempdir;
pub mod tool;

pub use error::{EngineError, EngineResult, ToolError, ToolResult};
pub use generate::ClientGenerator;
pub use orchestrator::{MigrateOptions, Orchestrator};
pub use script::ScriptRunner;
pub use staging::TargetedMigrator;
pub use tempdir::with_temp_dir;
pub use tool::{MigrationTool, PrismaCli};
