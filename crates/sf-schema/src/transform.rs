//! Schema transform for isolated client generation
//!
//! Rewrites a schema document so it can drive the external client
//! generator from a private temporary copy: exactly one client generator
//! block pointed at the requested output path, and a datasource whose
//! connection string does not depend on the copy's location.

use crate::ast::{Declaration, PrismaSchema, Value};
use crate::datasource::{sqlite_url_to_path, ResolvedDatasource};
use crate::error::{SchemaError, SchemaResult};
use std::path::Path;

/// Transform a parsed schema for a client-generation pass.
///
/// `client_output` becomes the generator's output path; the datasource url
/// is overwritten with the resolved connection string, absolutized against
/// `main_schema` for file-based providers.
pub fn transform(
    schema: PrismaSchema,
    client_output: &str,
    datasource: &ResolvedDatasource,
    main_schema: &Path,
) -> SchemaResult<PrismaSchema> {
    let schema = update_generator(schema, client_output)?;
    update_datasource(schema, datasource, main_schema)
}

/// Drop non-client generator blocks, require exactly one client generator,
/// and point its output at `client_output`
fn update_generator(schema: PrismaSchema, client_output: &str) -> SchemaResult<PrismaSchema> {
    let mut client_generators = 0usize;
    let mut declarations = Vec::with_capacity(schema.declarations.len());

    for declaration in schema.declarations {
        match declaration {
            Declaration::Generator(block) => {
                if block.is_client_generator() {
                    client_generators += 1;
                    declarations.push(Declaration::Generator(
                        block.with_config("output", Value::Literal(client_output.to_string())),
                    ));
                }
                // Non-client generators are dropped
            }
            other => declarations.push(other),
        }
    }

    match client_generators {
        0 => Err(SchemaError::MissingGenerator),
        1 => Ok(PrismaSchema { declarations }),
        _ => Err(SchemaError::AmbiguousGenerator),
    }
}

/// Overwrite the datasource url with the resolved connection string,
/// absolutized for file-based providers
fn update_datasource(
    schema: PrismaSchema,
    datasource: &ResolvedDatasource,
    main_schema: &Path,
) -> SchemaResult<PrismaSchema> {
    let count = schema
        .declarations
        .iter()
        .filter(|decl| matches!(decl, Declaration::Datasource(_)))
        .count();
    if count != 1 {
        return Err(SchemaError::InvalidDatasource {
            reason: format!("the schema must contain exactly one datasource, found {}", count),
        });
    }

    let url = if datasource.provider.is_file_based() {
        let path = sqlite_url_to_path(&datasource.url, main_schema)?;
        format!("file:{}", path.display())
    } else {
        datasource.url.clone()
    };

    let mut declarations = Vec::with_capacity(schema.declarations.len());
    for declaration in schema.declarations {
        match declaration {
            Declaration::Datasource(block) => {
                if block.config("url").is_none() {
                    return Err(SchemaError::InvalidDatasource {
                        reason: "the datasource block is missing a url setting".to_string(),
                    });
                }
                declarations.push(Declaration::Datasource(
                    block.with_config("url", Value::Literal(url.clone())),
                ));
            }
            other => declarations.push(other),
        }
    }

    Ok(PrismaSchema { declarations })
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
