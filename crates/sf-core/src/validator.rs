//! Migration set classification

use crate::error::{CoreError, CoreResult};
use crate::migration::{is_migration_entry, MigrationSet};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static POST_SCRIPT_RE: OnceLock<Regex> = OnceLock::new();

/// Matches a post-script file name: `post` with at most one extension
fn post_script_re() -> &'static Regex {
    POST_SCRIPT_RE
        .get_or_init(|| Regex::new(r"^post(\.[a-zA-Z0-9]+)?$").expect("valid regex literal"))
}

/// Returns true when an entry name is a post-script file name
pub fn is_post_script_name(name: &str) -> bool {
    post_script_re().is_match(name)
}

/// Classifies entries of the migrations directory.
///
/// All checks are pure reads over the directory contents; nothing here
/// mutates the migration set.
#[derive(Debug, Clone)]
pub struct Validator {
    migrations_dir: PathBuf,
    schema_file_name: String,
}

impl Validator {
    /// Create a validator over a migrations directory
    pub fn new(migrations_dir: PathBuf, schema_file_name: impl Into<String>) -> Self {
        Self {
            migrations_dir,
            schema_file_name: schema_file_name.into(),
        }
    }

    /// True iff `name` is listed in the migration set and is neither the
    /// sentinel nor an OS artifact entry
    pub fn is_migration(&self, name: &str) -> CoreResult<bool> {
        if !is_migration_entry(name) {
            return Ok(false);
        }

        let set = MigrationSet::read(&self.migrations_dir)?;
        Ok(set.contains(name))
    }

    /// True iff the unit exists and contains the configured schema file
    pub fn has_embedded_schema(&self, name: &str) -> CoreResult<bool> {
        if !self.is_migration(name)? {
            return Ok(false);
        }

        let schema_path = self
            .migrations_dir
            .join(name)
            .join(&self.schema_file_name);
        Ok(schema_path.is_file())
    }

    /// True iff the unit exists and contains a `post[.ext]` file
    pub fn has_post_script(&self, name: &str) -> CoreResult<bool> {
        if !self.is_migration(name)? {
            return Ok(false);
        }

        let unit_dir = self.migrations_dir.join(name);
        Ok(find_post_script(&unit_dir)?.is_some())
    }

    /// Fail with `UnknownMigration` unless `name` is a migration unit
    pub fn assert_is_migration(&self, name: &str) -> CoreResult<()> {
        if self.is_migration(name)? {
            Ok(())
        } else {
            Err(CoreError::UnknownMigration {
                name: name.to_string(),
            })
        }
    }
}

/// Locate the post-script file inside a migration unit directory.
///
/// Entries are scanned in lexical order so the result is deterministic
/// should a unit carry more than one matching file.
pub fn find_post_script(unit_dir: &Path) -> CoreResult<Option<PathBuf>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(unit_dir).map_err(|e| CoreError::IoWithPath {
        path: unit_dir.display().to_string(),
        source: e,
    })? {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: unit_dir.display().to_string(),
            source: e,
        })?;
        if let Ok(name) = entry.file_name().into_string() {
            if is_post_script_name(&name) {
                names.push(name);
            }
        }
    }
    names.sort();

    Ok(names.first().map(|name| unit_dir.join(name)))
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
