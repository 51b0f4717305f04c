//! Datasource resolution from the canonical schema

use crate::ast::{Declaration, Value};
use crate::error::{SchemaError, SchemaResult};
use crate::parser::parse_schema;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Supported relational datasource providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// PostgreSQL
    Postgresql,
    /// SQLite (file-based)
    Sqlite,
}

impl Provider {
    /// Provider name as written in a schema document
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Postgresql => "postgresql",
            Provider::Sqlite => "sqlite",
        }
    }

    /// True when the connection string names a file on disk
    pub fn is_file_based(&self) -> bool {
        matches!(self, Provider::Sqlite)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgresql" => Ok(Provider::Postgresql),
            "sqlite" => Ok(Provider::Sqlite),
            other => Err(SchemaError::UnsupportedProvider {
                provider: other.to_string(),
            }),
        }
    }
}

/// A datasource with its provider and connection string resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDatasource {
    pub provider: Provider,
    pub url: String,
}

/// Read the datasource configuration (provider and url) from a schema file,
/// resolving env() references against the process environment
pub fn read_datasource(schema_path: &Path) -> SchemaResult<ResolvedDatasource> {
    let source =
        std::fs::read_to_string(schema_path).map_err(|e| SchemaError::IoWithPath {
            path: schema_path.display().to_string(),
            source: e,
        })?;
    let schema = parse_schema(&source)?;

    let block = schema
        .declarations
        .iter()
        .find_map(|decl| match decl {
            Declaration::Datasource(block) => Some(block),
            _ => None,
        })
        .ok_or_else(|| SchemaError::InvalidDatasource {
            reason: "the schema contains no datasource block".to_string(),
        })?;

    let provider_value = block
        .config("provider")
        .ok_or_else(|| SchemaError::InvalidDatasource {
            reason: "the datasource block is missing a provider setting".to_string(),
        })?;
    let url_value = block
        .config("url")
        .ok_or_else(|| SchemaError::InvalidDatasource {
            reason: "the datasource block is missing a url setting".to_string(),
        })?;

    let provider = resolve_string(provider_value)?.parse::<Provider>()?;
    let url = resolve_string(url_value)?;

    Ok(ResolvedDatasource { provider, url })
}

/// Resolve a config value to a string, expanding env() references.
/// Only string literals and env() calls are accepted.
fn resolve_string(value: &Value) -> SchemaResult<String> {
    match value {
        Value::Literal(s) => Ok(s.clone()),
        Value::EnvCall(name) => {
            std::env::var(name).map_err(|_| SchemaError::EnvVarMissing { name: name.clone() })
        }
        Value::Raw(raw) => Err(SchemaError::Parse {
            message: format!(
                "only string literals and env() calls are supported for provider and url, found: {}",
                raw
            ),
        }),
    }
}

/// Convert a SQLite `file:` URL to an absolute file path.
///
/// Relative paths resolve against the canonical schema file's directory
/// (or the path itself when it is a directory), never against the caller's
/// working directory: a copy of the schema used during generation lives
/// elsewhere, so a relative path would point at the wrong file.
pub fn sqlite_url_to_path(url: &str, main_schema: &Path) -> SchemaResult<PathBuf> {
    let raw = url
        .strip_prefix("file:")
        .ok_or_else(|| SchemaError::InvalidSqliteUrl {
            url: url.to_string(),
        })?;
    let raw = Path::new(raw);

    if raw.is_absolute() {
        return Ok(normalize(raw));
    }

    let schema_dir = if main_schema.is_dir() {
        main_schema
    } else {
        main_schema.parent().unwrap_or_else(|| Path::new("."))
    };

    Ok(normalize(&schema_dir.join(raw)))
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "datasource_test.rs"]
mod tests;
