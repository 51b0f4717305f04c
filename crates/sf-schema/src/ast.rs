//! Block-level AST for Prisma schema documents
//!
//! The tree keeps only what the transforms need in structured form:
//! datasource and generator blocks with their key/value members. Model,
//! enum, and every other declaration kind is carried verbatim as raw text,
//! so serialization reproduces them untouched.

use std::fmt;

/// Provider value identifying the client generator
pub const CLIENT_GENERATOR_PROVIDER: &str = "prisma-client-js";

/// A parsed schema document
#[derive(Debug, Clone, PartialEq)]
pub struct PrismaSchema {
    pub declarations: Vec<Declaration>,
}

/// One top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A `datasource <name> { ... }` block
    Datasource(Block),
    /// A `generator <name> { ... }` block
    Generator(Block),
    /// Any other top-level content, preserved verbatim
    Other(String),
}

/// A named configuration block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub members: Vec<Member>,
}

/// One line inside a configuration block
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A `key = value` setting
    Config { name: String, value: Value },
    /// A comment or unrecognized line, preserved verbatim
    Raw(String),
}

/// A configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double-quoted string literal (unescaped)
    Literal(String),
    /// An `env("NAME")` reference
    EnvCall(String),
    /// Anything else (booleans, arrays, identifiers), kept as written
    Raw(String),
}

impl Block {
    /// Look up a config member's value by name
    pub fn config(&self, name: &str) -> Option<&Value> {
        self.members.iter().find_map(|member| match member {
            Member::Config {
                name: member_name,
                value,
            } if member_name == name => Some(value),
            _ => None,
        })
    }

    /// Return a copy of the block with the named setting overwritten,
    /// appending it when absent
    pub fn with_config(mut self, name: &str, value: Value) -> Self {
        for member in &mut self.members {
            if let Member::Config {
                name: member_name,
                value: member_value,
            } = member
            {
                if member_name == name {
                    *member_value = value;
                    return self;
                }
            }
        }

        self.members.push(Member::Config {
            name: name.to_string(),
            value,
        });
        self
    }

    /// True when this block is the client generator
    pub fn is_client_generator(&self) -> bool {
        matches!(
            self.config("provider"),
            Some(Value::Literal(provider)) if provider == CLIENT_GENERATOR_PROVIDER
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(s) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Value::EnvCall(name) => write!(f, "env(\"{}\")", name),
            Value::Raw(s) => f.write_str(s),
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, keyword: &str, block: &Block) -> fmt::Result {
    writeln!(f, "{} {} {{", keyword, block.name)?;
    for member in &block.members {
        match member {
            Member::Config { name, value } => writeln!(f, "  {} = {}", name, value)?,
            Member::Raw(line) => writeln!(f, "  {}", line)?,
        }
    }
    write!(f, "}}")
}

impl fmt::Display for PrismaSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            match declaration {
                Declaration::Datasource(block) => write_block(f, "datasource", block)?,
                Declaration::Generator(block) => write_block(f, "generator", block)?,
                Declaration::Other(raw) => f.write_str(raw.trim_end())?,
            }
        }
        writeln!(f)
    }
}
