//! Merge-schema command implementation

use anyhow::{Context, Result};
use sf_core::files_with_extension;
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, MergeSchemaArgs};
use crate::commands::common::load_project;

/// Execute the merge-schema command
pub async fn execute(args: &MergeSchemaArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let schema_dir = project.root.join(&args.schema_dir);

    anyhow::ensure!(
        schema_dir.is_dir(),
        "Schema folder not found: {}",
        schema_dir.display()
    );

    println!("Merging schema files");
    let merged = merge_prisma_files(&schema_dir)?;

    let output = project.root.join(&args.output);
    fs::write(&output, merged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Schema files merged into {}", output.display());
    Ok(())
}

/// Concatenate every .prisma file under a folder, each preceded by a
/// header naming its source file
fn merge_prisma_files(schema_dir: &Path) -> Result<String> {
    let files = files_with_extension(schema_dir, "prisma")
        .with_context(|| format!("Failed to walk {}", schema_dir.display()))?;

    let mut merged = String::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let basename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        merged.push_str(&format!("//--- {} ---\n{}\n", basename, content));
    }

    Ok(merged)
}

#[cfg(test)]
#[path = "merge_schema_test.rs"]
mod tests;
