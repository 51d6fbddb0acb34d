//! JSON parser.

use super::{Parser, read_bytes};
use crate::Result;
use crate::models::Value;
use std::path::Path;

/// Parses a whole JSON document into a [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        let bytes = read_bytes(path)?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(Value::from(value))
    }
}
