//! External migration tool interface

use crate::error::{ToolError, ToolResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;

/// The external applier/generator behind a narrow seam.
///
/// The engine depends on this interface rather than a concrete
/// process-spawn mechanism, so tests can substitute a fake.
#[async_trait]
pub trait MigrationTool: Send + Sync {
    /// Apply every pending migration visible beside the schema.
    /// Output streams to the operator; non-zero exit is fatal.
    async fn apply(&self, schema: &Path) -> ToolResult<()>;

    /// Generate the client configured inside the schema's generator block
    async fn generate(&self, schema: &Path) -> ToolResult<()>;
}

/// Production implementation shelling out to the Prisma CLI
pub struct PrismaCli;

impl PrismaCli {
    async fn run(args: &[&str], schema: &Path, quiet: bool) -> ToolResult<()> {
        let schema_flag = format!("--schema={}", schema.display());
        let command = format!("npx prisma {} {}", args.join(" "), schema_flag);

        let mut cmd = tokio::process::Command::new("npx");
        cmd.arg("prisma").args(args).arg(&schema_flag);
        if quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().await.map_err(|e| ToolError::Spawn {
            command: command.clone(),
            source: e,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::ExitError {
                command,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

#[async_trait]
impl MigrationTool for PrismaCli {
    async fn apply(&self, schema: &Path) -> ToolResult<()> {
        Self::run(&["migrate", "deploy"], schema, false).await
    }

    async fn generate(&self, schema: &Path) -> ToolResult<()> {
        Self::run(&["generate"], schema, true).await
    }
}
