//! TOML parser.

use super::{Parser, read_text};
use crate::Result;
use crate::models::Value;
use std::path::Path;

/// Parses a whole TOML document into a [`Value::Mapping`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl Parser for TomlParser {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        let content = read_text(path)?;
        let table: toml::Table = toml::from_str(&content)?;
        Ok(Value::from(table))
    }
}
