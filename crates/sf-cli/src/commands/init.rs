//! Init command implementation

use anyhow::{Context, Result};
use sf_core::{Config, CONFIG_FILE_NAME};
use std::fs;

use crate::cli::{GlobalArgs, InitArgs};

/// Execute the init command
pub async fn execute(_args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let root = std::path::Path::new(&global.project_dir);
    let config_path = root.join(CONFIG_FILE_NAME);

    anyhow::ensure!(
        !config_path.exists(),
        "Config file already exists: {}",
        config_path.display()
    );

    let config = Config::default();
    let content =
        serde_yaml::to_string(&config).context("Failed to serialize default configuration")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
