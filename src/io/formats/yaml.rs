//! YAML parser.
//!
//! Supports YAML document streams (multiple documents separated by `---`).
//! All documents are merged into one mapping:
//!
//! - mapping documents merge their keys, later documents winning on collision
//! - sequence documents contribute each item under `document index + item index`
//! - empty (null) documents are skipped
//! - scalar documents are rejected

use super::{Parser, read_text};
use crate::models::{Record, Value};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Parses a YAML document stream into one merged [`Value::Mapping`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        let content = read_text(path)?;
        let mut merged = Record::new();

        for (doc_index, document) in serde_yaml_ng::Deserializer::from_str(&content).enumerate() {
            let document = serde_yaml_ng::Value::deserialize(document)?;

            match Value::from(document) {
                Value::Mapping(map) => merged.extend(map),
                Value::Sequence(items) => {
                    for (item_index, item) in items.into_iter().enumerate() {
                        merged.insert((doc_index + item_index).to_string(), item);
                    }
                },
                Value::Null => {
                    tracing::trace!(path = %path.display(), doc_index, "Skipping empty YAML document");
                },
                other => {
                    return Err(Error::InvalidDocument {
                        path: path.to_path_buf(),
                        reason: format!(
                            "YAML document {} is a {}, expected a mapping or sequence",
                            doc_index + 1,
                            other.kind()
                        ),
                    });
                },
            }
        }

        Ok(Value::Mapping(merged))
    }
}
