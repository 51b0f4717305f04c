//! Ordered migration set model

use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Reserved lock/metadata entry inside the migrations directory.
/// It is never a migration unit and never moves.
pub const MIGRATION_LOCK_FILE: &str = "migration_lock.toml";

/// OS artifact entries ignored by all set arithmetic
const OS_ARTIFACTS: &[&str] = &[".DS_Store"];

/// Returns true when a directory entry name can count as a migration unit
pub fn is_migration_entry(name: &str) -> bool {
    name != MIGRATION_LOCK_FILE && !OS_ARTIFACTS.contains(&name)
}

/// The ordered migration set read from a migrations directory.
///
/// Ordering is lexical, which matches the timestamp-prefixed naming
/// convention of the external tool. The set is an immutable snapshot for
/// one engine invocation.
#[derive(Debug, Clone)]
pub struct MigrationSet {
    entries: Vec<String>,
}

impl MigrationSet {
    /// Read the migration set from a directory
    pub fn read(dir: &Path) -> CoreResult<Self> {
        if !dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })? {
            let entry = entry.map_err(|e| CoreError::IoWithPath {
                path: dir.display().to_string(),
                source: e,
            })?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| CoreError::NonUtf8Entry {
                    path: dir.display().to_string(),
                })?;
            entries.push(name);
        }
        entries.sort();

        Ok(Self { entries })
    }

    /// All directory entries in lexical order, sentinel included
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Migration unit names in order, sentinel and OS artifacts excluded
    pub fn migrations(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|name| is_migration_entry(name))
    }

    /// Check whether a name is a migration unit in this set
    pub fn contains(&self, name: &str) -> bool {
        self.migrations().any(|m| m == name)
    }

    /// The last migration unit, if any
    pub fn last(&self) -> Option<&str> {
        self.migrations().last()
    }

    /// Migration units strictly after the target, in order.
    /// Fails with `UnknownMigration` when the target is not in the set.
    pub fn after(&self, target: &str) -> CoreResult<Vec<String>> {
        let migrations: Vec<&str> = self.migrations().collect();
        let index = migrations
            .iter()
            .position(|m| *m == target)
            .ok_or_else(|| CoreError::UnknownMigration {
                name: target.to_string(),
            })?;

        Ok(migrations[index + 1..]
            .iter()
            .map(|m| m.to_string())
            .collect())
    }

    /// Migration units from the start up to the target.
    ///
    /// With no target the whole set is returned. With a target, the slice
    /// ends just before it, or includes it when `include_target` is set.
    pub fn up_to(&self, target: Option<&str>, include_target: bool) -> CoreResult<Vec<String>> {
        let migrations: Vec<&str> = self.migrations().collect();
        let end = match target {
            Some(name) => {
                let index = migrations
                    .iter()
                    .position(|m| *m == name)
                    .ok_or_else(|| CoreError::UnknownMigration {
                        name: name.to_string(),
                    })?;
                index + usize::from(include_target)
            }
            None => migrations.len(),
        };

        Ok(migrations[..end].iter().map(|m| m.to_string()).collect())
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
