//! Per-migration client generation
//!
//! Client generation runs from a private, temporary copy of each
//! migration's embedded schema, so every migration can generate a client
//! pinned to its own schema snapshot without mutating checked-in files.

use crate::error::{EngineError, EngineResult};
use crate::tempdir::with_temp_dir;
use crate::tool::MigrationTool;
use sf_core::{MigrationSet, Validator};
use sf_schema::{parse_schema, transform, ResolvedDatasource};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the transformed schema copy inside the temp dir
const TEMP_SCHEMA_FILE_NAME: &str = "schema.prisma";

/// Generates clients for migrations carrying an embedded schema
pub struct ClientGenerator {
    migrations_dir: PathBuf,
    temp_dir: PathBuf,
    main_schema: PathBuf,
    schema_file_name: String,
    output_dir: String,
    tool: Arc<dyn MigrationTool>,
}

impl ClientGenerator {
    pub fn new(
        migrations_dir: PathBuf,
        temp_dir: PathBuf,
        main_schema: PathBuf,
        schema_file_name: impl Into<String>,
        output_dir: impl Into<String>,
        tool: Arc<dyn MigrationTool>,
    ) -> Self {
        Self {
            migrations_dir,
            temp_dir,
            main_schema,
            schema_file_name: schema_file_name.into(),
            output_dir: output_dir.into(),
            tool,
        }
    }

    /// Generate a client for every migration with an embedded schema, in
    /// set order. A failure aborts the pass; clients already generated
    /// stay in place.
    pub async fn generate_all(
        &self,
        datasource: &ResolvedDatasource,
        validator: &Validator,
    ) -> EngineResult<()> {
        let set = MigrationSet::read(&self.migrations_dir)?;
        for name in set.migrations() {
            if !validator.has_embedded_schema(name)? {
                continue;
            }
            self.generate_for(name, datasource).await?;
        }
        Ok(())
    }

    /// Generate the client for one migration's embedded schema
    pub async fn generate_for(
        &self,
        name: &str,
        datasource: &ResolvedDatasource,
    ) -> EngineResult<()> {
        println!("Generating client for migration: {}", name);

        self.generate_inner(name, datasource)
            .await
            .map_err(|e| EngineError::Generation {
                migration: name.to_string(),
                source: Box::new(e),
            })
    }

    async fn generate_inner(
        &self,
        name: &str,
        datasource: &ResolvedDatasource,
    ) -> EngineResult<()> {
        let schema_path = self.migrations_dir.join(name).join(&self.schema_file_name);
        let output = self.client_output_path(name, &schema_path);

        with_temp_dir(&self.temp_dir, || {
            self.run_generation(&schema_path, &output, datasource)
        })
        .await
    }

    /// Transform the embedded schema into the temp dir and hand it to the
    /// external generator
    async fn run_generation(
        &self,
        schema_path: &Path,
        output: &Path,
        datasource: &ResolvedDatasource,
    ) -> EngineResult<()> {
        let source = fs::read_to_string(schema_path).map_err(|e| EngineError::IoWithPath {
            path: schema_path.display().to_string(),
            source: e,
        })?;

        let schema = parse_schema(&source)?;
        let transformed = transform(
            schema,
            &output.display().to_string(),
            datasource,
            &self.main_schema,
        )?;

        let temp_schema = self.temp_dir.join(TEMP_SCHEMA_FILE_NAME);
        fs::write(&temp_schema, transformed.to_string()).map_err(|e| EngineError::IoWithPath {
            path: temp_schema.display().to_string(),
            source: e,
        })?;

        self.tool.generate(&temp_schema).await?;
        Ok(())
    }

    /// Client output path for a migration: `output_dir/<name>`, resolved
    /// against the embedded schema's directory when relative. The schema
    /// copy used for generation lives elsewhere, so a relative output
    /// must not resolve against it.
    fn client_output_path(&self, name: &str, schema_path: &Path) -> PathBuf {
        let output = Path::new(&self.output_dir).join(name);
        if output.is_absolute() {
            output
        } else {
            schema_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(output)
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
