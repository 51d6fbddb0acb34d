//! Plain-text parser.

use super::{Parser, read_text};
use crate::Result;
use crate::models::Value;
use std::path::Path;

/// Returns the whole file content as a single string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl Parser for TextParser {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        read_text(path).map(Value::String)
    }
}
