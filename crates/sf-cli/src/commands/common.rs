//! Shared command helpers

use anyhow::{Context, Result};
use sf_core::{Config, Validator};
use sf_engine::{ClientGenerator, PrismaCli, ScriptRunner, TargetedMigrator};
use sf_schema::{read_datasource, ResolvedDatasource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// A loaded project: its root directory and configuration
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.config.temp_dir_absolute(&self.root)
    }

    pub fn main_schema(&self) -> PathBuf {
        self.config.main_schema_absolute(&self.root)
    }

    /// Validator over the project's migrations directory
    pub fn validator(&self) -> Validator {
        Validator::new(
            self.migrations_dir(),
            self.config.migration_schema_file_name.clone(),
        )
    }

    /// Targeted migration engine bound to the Prisma CLI
    pub fn migrator(&self) -> TargetedMigrator {
        TargetedMigrator::new(
            self.migrations_dir(),
            self.temp_dir(),
            self.main_schema(),
            Arc::new(PrismaCli),
        )
    }

    /// Post-script runner from the configured command template
    pub fn script_runner(&self) -> ScriptRunner {
        ScriptRunner::new(self.config.exec_script_command.clone())
    }

    /// Client generation driver bound to the Prisma CLI
    pub fn client_generator(&self) -> ClientGenerator {
        ClientGenerator::new(
            self.migrations_dir(),
            self.temp_dir(),
            self.main_schema(),
            self.config.migration_schema_file_name.clone(),
            self.config.output_dir.clone(),
            Arc::new(PrismaCli),
        )
    }

    /// Read the datasource from the canonical schema
    pub fn datasource(&self) -> Result<ResolvedDatasource> {
        read_datasource(&self.main_schema()).context("Failed to read datasource from main schema")
    }
}

/// Load the project from the global arguments
pub fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = project_root(&global.project_dir)?;

    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load configuration")?;

    if global.verbose {
        eprintln!("[verbose] Project root: {}", root.display());
        eprintln!(
            "[verbose] Migrations directory: {}",
            config.migrations_dir_absolute(&root).display()
        );
    }

    Ok(Project { root, config })
}

fn project_root(project_dir: &str) -> Result<PathBuf> {
    let path = Path::new(project_dir);
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to resolve current directory")?
            .join(path)
    };

    anyhow::ensure!(
        root.is_dir(),
        "Project directory not found: {}",
        root.display()
    );
    Ok(root)
}
