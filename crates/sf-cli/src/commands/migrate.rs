//! Migrate command implementation

use anyhow::{Context, Result};
use sf_engine::{MigrateOptions, Orchestrator};
use sf_store::store_for;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::load_project;

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let datasource = project.datasource()?;

    if global.verbose {
        eprintln!(
            "[verbose] Datasource provider: {}",
            datasource.provider.as_str()
        );
    }

    let mut store = store_for(&datasource, &project.main_schema())
        .context("Failed to open migration history store")?;

    let orchestrator = Orchestrator::new(
        project.migrator(),
        project.script_runner(),
        project.validator(),
        project.migrations_dir(),
    );

    let options = MigrateOptions {
        target: args.target.clone(),
        include_target: !args.exclude_target,
    };

    orchestrator
        .run(store.as_mut(), &options)
        .await
        .context("Migration run failed")?;

    match &args.target {
        Some(target) => println!("Migrated up to {}", target),
        None => println!("All migrations applied"),
    }
    Ok(())
}
