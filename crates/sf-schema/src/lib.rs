//! sf-schema - Prisma schema parsing layer for Stepflow
//!
//! This crate provides a block-level AST over schema documents, the
//! datasource reader, and the generator/datasource transform used to
//! prepare a schema copy for isolated client generation.

pub mod ast;
pub mod datasource;
pub mod error;
pub mod parser;
pub mod transform;

pub use ast::{Block, Declaration, Member, PrismaSchema, Value, CLIENT_GENERATOR_PROVIDER};
pub use datasource::{read_datasource, sqlite_url_to_path, Provider, ResolvedDatasource};
pub use error::SchemaError;
pub use parser::parse_schema;
pub use transform::transform;
