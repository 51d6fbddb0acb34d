//! Structured case values.
//!
//! Every format parser produces a [`Value`] tree so downstream code can match
//! exhaustively instead of probing a dynamic type.

use indexmap::IndexMap;
use serde::Serialize;

/// A record: field name to value.
///
/// Keys keep the order they appear in the source file. Equality ignores order.
pub type Record = IndexMap<String, Value>;

/// A structured value parsed from a case file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`null` in JSON, `~` in YAML).
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number, also used for integers outside the `i64` range.
    Float(f64),
    /// Text.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<Self>),
    /// String-keyed mapping.
    Mapping(Record),
}

impl Value {
    /// Returns a short name for the kind of value, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the record, if this is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Record> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items, if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Self::Mapping(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            },
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(n) => Self::Integer(n),
            toml::Value::Float(n) => Self::Float(n),
            toml::Value::Boolean(b) => Self::Bool(b),
            // Datetimes keep their RFC 3339 text form
            toml::Value::Datetime(dt) => Self::String(dt.to_string()),
            toml::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            },
            toml::Value::Table(table) => Self::from(table),
        }
    }
}

impl From<toml::Table> for Value {
    fn from(table: toml::Table) -> Self {
        Self::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (key, Self::from(value)))
                .collect(),
        )
    }
}

impl From<serde_yaml_ng::Value> for Value {
    fn from(value: serde_yaml_ng::Value) -> Self {
        match value {
            serde_yaml_ng::Value::Null => Self::Null,
            serde_yaml_ng::Value::Bool(b) => Self::Bool(b),
            serde_yaml_ng::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_yaml_ng::Value::String(s) => Self::String(s),
            serde_yaml_ng::Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            },
            serde_yaml_ng::Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (yaml_key(key), Self::from(value)))
                    .collect(),
            ),
            // Tags carry no meaning for a casebase; keep the tagged value
            serde_yaml_ng::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Renders a YAML mapping key as a string.
///
/// YAML allows any node as a key; scalars use their natural text form and
/// complex keys fall back to their inline YAML serialization.
fn yaml_key(key: serde_yaml_ng::Value) -> String {
    match key {
        serde_yaml_ng::Value::String(s) => s,
        serde_yaml_ng::Value::Number(n) => n.to_string(),
        serde_yaml_ng::Value::Bool(b) => b.to_string(),
        serde_yaml_ng::Value::Null => "null".to_string(),
        other => serde_yaml_ng::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
