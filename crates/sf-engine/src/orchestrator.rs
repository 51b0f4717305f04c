//! Post-migration orchestration
//!
//! Drives the per-data-migration cycle: apply up to the migration, check
//! whether its applied-step counter advanced by exactly one, and only then
//! run its post-script. The store's counters are the durable record of
//! progress, so re-running the whole orchestration against the same store
//! is safe: a previously applied migration shows a delta of zero and its
//! side effect does not repeat.

use crate::error::EngineResult;
use crate::script::ScriptRunner;
use crate::staging::TargetedMigrator;
use sf_core::{MigrationSet, Validator};
use sf_store::MigrationStore;
use std::path::PathBuf;

/// Options for one orchestrated migration run
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Migration name to stop at; the whole set when absent
    pub target: Option<String>,
    /// Whether the target itself is applied
    pub include_target: bool,
}

/// Drives targeted applies and post-scripts across the migration set
pub struct Orchestrator {
    migrator: TargetedMigrator,
    script_runner: ScriptRunner,
    validator: Validator,
    migrations_dir: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator over the engine, script runner, and
    /// validator of one migrations directory
    pub fn new(
        migrator: TargetedMigrator,
        script_runner: ScriptRunner,
        validator: Validator,
        migrations_dir: PathBuf,
    ) -> Self {
        Self {
            migrator,
            script_runner,
            validator,
            migrations_dir,
        }
    }

    /// Run the orchestrated migration cycle.
    ///
    /// The store connection is opened once and closed on completion or
    /// failure; any engine failure aborts the run immediately.
    pub async fn run(
        &self,
        store: &mut dyn MigrationStore,
        options: &MigrateOptions,
    ) -> EngineResult<()> {
        if let Some(target) = &options.target {
            self.validator.assert_is_migration(target)?;
        }

        let set = MigrationSet::read(&self.migrations_dir)?;
        let migrations = set.up_to(options.target.as_deref(), options.include_target)?;

        let mut data_migrations = Vec::new();
        for name in &migrations {
            if self.validator.has_post_script(name)? {
                data_migrations.push(name.clone());
            }
        }

        store.connect().await?;
        let outcome = self.drive(store, &migrations, &data_migrations).await;

        if let Err(e) = store.disconnect().await {
            match &outcome {
                Ok(()) => return Err(e.into()),
                Err(_) => log::warn!("store disconnect failed after run failure: {}", e),
            }
        }

        outcome
    }

    async fn drive(
        &self,
        store: &mut dyn MigrationStore,
        migrations: &[String],
        data_migrations: &[String],
    ) -> EngineResult<()> {
        for name in data_migrations {
            let count_before = store.applied_steps(name).await?;
            self.migrator.migrate_to(name).await?;
            let count_after = store.applied_steps(name).await?;

            if count_after == count_before + 1 {
                println!("Executing post-migrate script for migration: {}", name);
                self.script_runner
                    .run_post_script(&self.migrations_dir.join(name))
                    .await?;
            } else {
                log::debug!(
                    "skipping post script for {} (applied step delta {})",
                    name,
                    count_after - count_before
                );
            }
        }

        // Trailing non-data migrations still need one catch-up apply
        if data_migrations.last() != migrations.last() {
            if let Some(last) = migrations.last() {
                self.migrator.migrate_to(last).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
