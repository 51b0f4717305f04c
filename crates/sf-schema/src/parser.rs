//! Prisma schema parser
//!
//! Line-oriented: block headers are recognized by keyword, datasource and
//! generator bodies are parsed into members, and every other block kind is
//! captured verbatim by matching braces.

use crate::ast::{Block, Declaration, Member, PrismaSchema, Value};
use crate::error::{SchemaError, SchemaResult};
use regex::Regex;
use std::sync::OnceLock;

static BLOCK_HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn block_header_re() -> &'static Regex {
    BLOCK_HEADER_RE.get_or_init(|| {
        Regex::new(r"^(datasource|generator|model|enum|type|view)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{")
            .expect("valid regex literal")
    })
}

static CONFIG_RE: OnceLock<Regex> = OnceLock::new();

fn config_re() -> &'static Regex {
    CONFIG_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+)$").expect("valid regex literal")
    })
}

static ENV_RE: OnceLock<Regex> = OnceLock::new();

fn env_re() -> &'static Regex {
    ENV_RE.get_or_init(|| Regex::new(r#"^env\(\s*"([^"]+)"\s*\)"#).expect("valid regex literal"))
}

/// Parse a schema document into its block-level AST
pub fn parse_schema(source: &str) -> SchemaResult<PrismaSchema> {
    let lines: Vec<&str> = source.lines().collect();
    let mut declarations = Vec::new();
    let mut free_lines: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        let captures = match block_header_re().captures(trimmed) {
            Some(captures) => captures,
            None => {
                free_lines.push(lines[i]);
                i += 1;
                continue;
            }
        };

        flush_free_lines(&mut declarations, &mut free_lines);

        let keyword = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let name = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let start = i;
        let end = find_block_end(&lines, start).ok_or_else(|| SchemaError::Parse {
            message: format!("unterminated {} block '{}'", keyword, name),
        })?;
        i = end + 1;

        let declaration = match keyword {
            "datasource" => Declaration::Datasource(parse_block(name, &lines[start..=end])?),
            "generator" => Declaration::Generator(parse_block(name, &lines[start..=end])?),
            _ => Declaration::Other(lines[start..=end].join("\n")),
        };
        declarations.push(declaration);
    }

    flush_free_lines(&mut declarations, &mut free_lines);

    Ok(PrismaSchema { declarations })
}

/// Flush accumulated free-standing lines into an `Other` declaration
fn flush_free_lines(declarations: &mut Vec<Declaration>, free_lines: &mut Vec<&str>) {
    if free_lines.is_empty() {
        return;
    }

    let raw = free_lines.join("\n");
    free_lines.clear();

    let raw = raw.trim_matches('\n');
    if !raw.trim().is_empty() {
        declarations.push(Declaration::Other(raw.to_string()));
    }
}

/// Find the index of the line closing the block opened at `start`
fn find_block_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (offset, line) in lines[start..].iter().enumerate() {
        depth += brace_delta(line);
        if depth <= 0 {
            return Some(start + offset);
        }
    }
    None
}

/// Net brace depth change of one line, ignoring braces inside string
/// literals and line comments
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => break,
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }

    delta
}

/// Parse the body of a datasource/generator block into members
fn parse_block(name: String, lines: &[&str]) -> SchemaResult<Block> {
    let text = lines.join("\n");
    let open = text.find('{').ok_or_else(|| SchemaError::Parse {
        message: format!("block '{}' has no opening brace", name),
    })?;
    let close = text.rfind('}').ok_or_else(|| SchemaError::Parse {
        message: format!("block '{}' has no closing brace", name),
    })?;

    let mut members = Vec::new();
    for line in text[open + 1..close].lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        members.push(parse_member(line)?);
    }

    Ok(Block { name, members })
}

/// Parse one block line into a member
fn parse_member(line: &str) -> SchemaResult<Member> {
    if line.starts_with("//") {
        return Ok(Member::Raw(line.to_string()));
    }

    match config_re().captures(line) {
        Some(captures) => {
            let name = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let value = parse_value(captures.get(2).map(|m| m.as_str()).unwrap_or_default())?;
            Ok(Member::Config { name, value })
        }
        None => Ok(Member::Raw(line.to_string())),
    }
}

/// Parse a config value: string literal, env() call, or raw text
fn parse_value(raw: &str) -> SchemaResult<Value> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix('"') {
        return parse_string_literal(rest).map(Value::Literal);
    }

    if let Some(captures) = env_re().captures(raw) {
        let name = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        return Ok(Value::EnvCall(name));
    }

    // Anything else is preserved as written, minus a trailing comment
    let raw = match raw.find("//") {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    };
    Ok(Value::Raw(raw.to_string()))
}

/// Consume a string literal body up to its closing quote, unescaping
/// `\"` and `\\`
fn parse_string_literal(rest: &str) -> SchemaResult<String> {
    let mut out = String::new();
    let mut escaped = false;

    for c in rest.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok(out);
        } else {
            out.push(c);
        }
    }

    Err(SchemaError::Parse {
        message: format!("unterminated string literal: \"{}", rest),
    })
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
