//! Format parsers for case files.
//!
//! Each format implements [`Parser`]: read a whole file, return a [`Value`].
//! File handles never outlive a single `parse` call.

pub mod csv;
pub mod json;
pub mod text;
pub mod toml;
pub mod xml;
pub mod yaml;

use crate::config::CsvSettings;
use crate::models::Value;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;
pub use self::text::TextParser;
pub use self::toml::TomlParser;
pub use self::xml::XmlParser;
pub use self::yaml::YamlParser;

/// A parser turning a file into a structured value.
///
/// Implementations must open and release their file handle within `parse`
/// and must surface the underlying format error unchanged.
pub trait Parser: Send + Sync {
    /// Short name for logs and listings.
    fn name(&self) -> &'static str;

    /// Parses the file at `path`.
    fn parse(&self, path: &Path) -> Result<Value>;
}

impl fmt::Debug for dyn Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser({})", self.name())
    }
}

/// Built-in file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
    /// YAML document stream.
    Yaml,
    /// CSV with a header row.
    Csv,
    /// Plain text, one case per file.
    Text,
}

impl Format {
    /// Every built-in format.
    pub const ALL: [Self; 5] = [Self::Json, Self::Toml, Self::Yaml, Self::Csv, Self::Text];

    /// Extension tokens (with leading dot) this format is registered under.
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &[".json"],
            Self::Toml => &[".toml"],
            Self::Yaml => &[".yaml", ".yml"],
            Self::Csv => &[".csv"],
            Self::Text => &[".txt"],
        }
    }

    /// Whether a file of this format can hold a whole casebase.
    ///
    /// Plain text has no internal structure to split into cases.
    #[must_use]
    pub const fn supports_batch(&self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Whether this format is a pure data format usable by [`crate::load_data`].
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Json | Self::Toml | Self::Yaml)
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Toml => "application/toml",
            Self::Yaml => "application/x-yaml",
            Self::Csv => "text/csv",
            Self::Text => "text/plain",
        }
    }

    /// Detects the format from an extension token such as `.yml`.
    ///
    /// Matching is case-sensitive.
    #[must_use]
    pub fn from_extension(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().iter().any(|ext| *ext == token))
    }

    /// Creates the parser for this format.
    #[must_use]
    pub fn parser(self, csv: &CsvSettings) -> Arc<dyn Parser> {
        match self {
            Self::Json => Arc::new(JsonParser),
            Self::Toml => Arc::new(TomlParser),
            Self::Yaml => Arc::new(YamlParser),
            Self::Csv => Arc::new(CsvParser::from_settings(csv)),
            Self::Text => Arc::new(TextParser),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().trim_start_matches('.') {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Returns the extension token of a path, including the leading dot.
///
/// `cases/a.json` gives `.json`; `archive.tar.gz` gives `.gz`; a path
/// without an extension gives `None`.
#[must_use]
pub fn extension_token(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

/// Reads a whole file as UTF-8 text.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a whole file as bytes.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
