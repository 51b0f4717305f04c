//! Targeted migration engine
//!
//! The external applier has no concept of "apply up to N"; the only lever
//! is what the applier sees. The engine therefore partitions the
//! migrations directory around one applier call: every unit after the
//! target moves into a staging area, the applier runs against the
//! remainder, and the staged units move back on every exit path.

use crate::error::{EngineError, EngineResult};
use crate::tool::MigrationTool;
use sf_core::MigrationSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Applies the migration set up to a chosen target
pub struct TargetedMigrator {
    migrations_dir: PathBuf,
    staging_dir: PathBuf,
    main_schema: PathBuf,
    tool: Arc<dyn MigrationTool>,
}

impl TargetedMigrator {
    /// Create an engine over a migrations directory.
    /// The staging directory is exclusively owned by this engine while a
    /// call is in flight; callers must serialize invocations.
    pub fn new(
        migrations_dir: PathBuf,
        staging_dir: PathBuf,
        main_schema: PathBuf,
        tool: Arc<dyn MigrationTool>,
    ) -> Self {
        Self {
            migrations_dir,
            staging_dir,
            main_schema,
            tool,
        }
    }

    /// Apply every migration up to and including `target`.
    ///
    /// Units after the target are hidden in the staging area for the
    /// duration of the applier call and restored afterwards, whatever the
    /// outcome. A restore failure leaves the migrations directory
    /// inconsistent and is always surfaced over any earlier failure.
    pub async fn migrate_to(&self, target: &str) -> EngineResult<()> {
        let set = MigrationSet::read(&self.migrations_dir)?;
        if !set.contains(target) {
            return Err(EngineError::TargetNotFound {
                name: target.to_string(),
            });
        }
        let to_stage = set.after(target)?;

        log::debug!("creating staging area {}", self.staging_dir.display());
        self.acquire_staging_area()?;

        log::debug!(
            "staging {} migration unit(s) after {}",
            to_stage.len(),
            target
        );
        let mut staged: Vec<String> = Vec::new();
        let mut failure: Option<EngineError> = None;
        for unit in &to_stage {
            let src = self.migrations_dir.join(unit);
            let dest = self.staging_dir.join(unit);
            match move_entry(&src, &dest) {
                Ok(()) => staged.push(unit.clone()),
                Err(e) => {
                    failure = Some(EngineError::StagingFailed {
                        unit: unit.clone(),
                        staging_dir: self.staging_dir.display().to_string(),
                        source: e,
                    });
                    break;
                }
            }
        }

        // The applier only runs against a completely partitioned set
        if failure.is_none() {
            match self.tool.apply(&self.main_schema).await {
                Ok(()) => log::debug!("all migrations up to {} applied", target),
                Err(e) => failure = Some(EngineError::Tool(e)),
            }
        }

        log::debug!("restoring {} staged unit(s)", staged.len());
        for unit in &staged {
            let src = self.staging_dir.join(unit);
            let dest = self.migrations_dir.join(unit);
            if let Err(e) = move_entry(&src, &dest) {
                if let Some(pending) = &failure {
                    log::error!("failure preceding the restore failure: {}", pending);
                }
                return Err(EngineError::RestoreFailed {
                    unit: unit.clone(),
                    staging_dir: self.staging_dir.display().to_string(),
                    source: e,
                });
            }
        }

        if let Err(e) = self.release_staging_area() {
            if let Some(pending) = &failure {
                log::warn!("{} (after: {})", e, pending);
            } else {
                failure = Some(e);
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create the staging area, refusing to run over leftovers of a
    /// previous crashed invocation
    fn acquire_staging_area(&self) -> EngineResult<()> {
        if self.staging_dir.is_dir() {
            let leftover = dir_is_populated(&self.staging_dir)?;
            if leftover {
                return Err(EngineError::StaleStagingArea {
                    path: self.staging_dir.display().to_string(),
                });
            }
        }

        fs::create_dir_all(&self.staging_dir).map_err(|e| EngineError::IoWithPath {
            path: self.staging_dir.display().to_string(),
            source: e,
        })
    }

    /// Remove the staging area, but only once it is empty. Deleting it
    /// with contents would silently lose migrations.
    fn release_staging_area(&self) -> EngineResult<()> {
        if dir_is_populated(&self.staging_dir)? {
            return Err(EngineError::StagingAreaNotEmpty {
                path: self.staging_dir.display().to_string(),
            });
        }

        fs::remove_dir(&self.staging_dir).map_err(|e| EngineError::IoWithPath {
            path: self.staging_dir.display().to_string(),
            source: e,
        })
    }
}

fn dir_is_populated(dir: &Path) -> EngineResult<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| EngineError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;
    Ok(entries.next().is_some())
}

/// Move a directory entry: copy completely, then remove the source.
///
/// A failed copy leaves the source untouched; the partial copy is dropped
/// so it cannot be mistaken for a fully staged unit.
fn move_entry(src: &Path, dest: &Path) -> std::io::Result<()> {
    let copied = if src.is_dir() {
        copy_dir_all(src, dest)
    } else {
        fs::copy(src, dest).map(|_| ())
    };

    if let Err(e) = copied {
        if dest.is_dir() {
            let _ = fs::remove_dir_all(dest);
        } else if dest.is_file() {
            let _ = fs::remove_file(dest);
        }
        return Err(e);
    }

    if src.is_dir() {
        fs::remove_dir_all(src)
    } else {
        fs::remove_file(src)
    }
}

/// Copy a directory tree
fn copy_dir_all(src: &Path, dest: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "staging_test.rs"]
mod tests;
