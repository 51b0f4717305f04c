//! Post-script execution

use crate::error::{EngineError, EngineResult};
use sf_core::{find_post_script, POST_SCRIPT_PLACEHOLDER};
use std::path::Path;

/// Runs a migration's post-script through the configured command template
pub struct ScriptRunner {
    exec_script_command: String,
}

impl ScriptRunner {
    /// Create a runner from the configured command template
    pub fn new(exec_script_command: impl Into<String>) -> Self {
        Self {
            exec_script_command: exec_script_command.into(),
        }
    }

    /// Run the post-script of the migration unit at `migration_dir`.
    ///
    /// The script's path replaces the `${post}` placeholder and the
    /// resulting command runs through the shell with inherited stdio, so
    /// its output streams to the operator. Non-zero exit is fatal.
    pub async fn run_post_script(&self, migration_dir: &Path) -> EngineResult<()> {
        let script =
            find_post_script(migration_dir)?.ok_or_else(|| EngineError::MissingPostScript {
                name: migration_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| migration_dir.display().to_string()),
            })?;

        let command = self
            .exec_script_command
            .replace(POST_SCRIPT_PLACEHOLDER, &script.display().to_string());

        log::debug!("running post script: {}", command);
        let status = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .map_err(|e| EngineError::ScriptLaunch {
                command: command.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::ScriptFailed {
                command,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
