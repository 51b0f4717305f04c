//! Run-post command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, RunPostArgs};
use crate::commands::common::load_project;

/// Execute the run-post command
pub async fn execute(args: &RunPostArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let validator = project.validator();

    validator.assert_is_migration(&args.migration)?;
    anyhow::ensure!(
        validator.has_post_script(&args.migration)?,
        "Migration {} does not have a post script",
        args.migration
    );

    let migration_dir = project.migrations_dir().join(&args.migration);
    project
        .script_runner()
        .run_post_script(&migration_dir)
        .await
        .with_context(|| format!("Post script failed for {}", args.migration))?;

    Ok(())
}
