//! Generate command implementation

use anyhow::{Context, Result};

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::load_project;

/// Execute the generate command
pub async fn execute(_args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let datasource = project.datasource()?;

    project
        .client_generator()
        .generate_all(&datasource, &project.validator())
        .await
        .context("Client generation failed")?;

    Ok(())
}
