//! Configuration types and parsing for stepflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder substituted with the post-script path in `exec_script_command`
pub const POST_SCRIPT_PLACEHOLDER: &str = "${post}";

/// Main project configuration from stepflow.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing the ordered migration units
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Staging directory used to hide migrations from the external applier
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    /// File name of the schema embedded inside a migration unit
    #[serde(default = "default_migration_schema_file_name")]
    pub migration_schema_file_name: String,

    /// Path to the canonical schema file the applier is bound to
    #[serde(default = "default_main_schema")]
    pub main_schema: String,

    /// Base output directory for generated clients
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Command template for post-scripts; `${post}` is replaced with the
    /// script path
    #[serde(default = "default_exec_script_command")]
    pub exec_script_command: String,
}

fn default_migrations_dir() -> String {
    "prisma/migrations".to_string()
}

fn default_temp_dir() -> String {
    ".stepflow-tmp".to_string()
}

fn default_migration_schema_file_name() -> String {
    "schema.prisma".to_string()
}

fn default_main_schema() -> String {
    "prisma/schema.prisma".to_string()
}

fn default_output_dir() -> String {
    "client".to_string()
}

fn default_exec_script_command() -> String {
    format!("sh {}", POST_SCRIPT_PLACEHOLDER)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            temp_dir: default_temp_dir(),
            migration_schema_file_name: default_migration_schema_file_name(),
            main_schema: default_main_schema(),
            output_dir: default_output_dir(),
            exec_script_command: default_exec_script_command(),
        }
    }
}

/// Config file name looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "stepflow.yml";

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    /// Looks for stepflow.yml or stepflow.yaml, falling back to defaults
    /// when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join(CONFIG_FILE_NAME);
        let yaml_path = dir.join("stepflow.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            log::info!("No config file found, falling back to default config");
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.temp_dir.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "temp_dir cannot be empty".to_string(),
            });
        }

        if self.migrations_dir == self.temp_dir {
            return Err(CoreError::ConfigInvalid {
                message: "temp_dir must differ from migrations_dir".to_string(),
            });
        }

        if !self
            .exec_script_command
            .contains(POST_SCRIPT_PLACEHOLDER)
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "exec_script_command must contain the {} placeholder",
                    POST_SCRIPT_PLACEHOLDER
                ),
            });
        }

        Ok(())
    }

    /// Resolve a relative path string to an absolute path against a root
    fn path_absolute(path: &str, root: &Path) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            root.join(p)
        }
    }

    /// Get the absolute migrations directory relative to a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        Self::path_absolute(&self.migrations_dir, root)
    }

    /// Get the absolute staging directory relative to a project root
    pub fn temp_dir_absolute(&self, root: &Path) -> PathBuf {
        Self::path_absolute(&self.temp_dir, root)
    }

    /// Get the absolute canonical schema path relative to a project root
    pub fn main_schema_absolute(&self, root: &Path) -> PathBuf {
        Self::path_absolute(&self.main_schema, root)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
