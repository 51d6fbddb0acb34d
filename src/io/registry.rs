//! Extension-keyed parser registries.
//!
//! Three registries are built from one shared base so the inclusion rules
//! hold without listing a format twice:
//!
//! | Registry | Formats | Used by |
//! |----------|---------|---------|
//! | data | JSON, TOML, YAML | [`crate::load_data`] |
//! | batch | data + CSV | a file passed to [`crate::load_path`] |
//! | single | batch + plain text | each file of a folder passed to [`crate::load_path`] |

use super::formats::{Format, Parser, extension_token};
use crate::config::CsvSettings;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Maps extension tokens (with leading dot) to parsers.
///
/// Each extension maps to exactly one parser; registering an extension
/// again replaces the previous parser.
#[derive(Debug, Clone, Default)]
pub struct LoaderRegistry {
    parsers: BTreeMap<String, Arc<dyn Parser>>,
}

impl LoaderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Structured data formats: `.json`, `.toml`, `.yaml`, `.yml`.
    #[must_use]
    pub fn data(csv: &CsvSettings) -> Self {
        Self::with_formats(
            Format::ALL.into_iter().filter(Format::is_data),
            csv,
        )
    }

    /// Formats whose files hold a whole casebase: data formats plus `.csv`.
    #[must_use]
    pub fn batch(csv: &CsvSettings) -> Self {
        let mut registry = Self::data(csv);
        registry.register_format(Format::Csv, csv);
        registry
    }

    /// Formats whose files hold one case: batch formats plus `.txt`.
    #[must_use]
    pub fn single(csv: &CsvSettings) -> Self {
        let mut registry = Self::batch(csv);
        registry.register_format(Format::Text, csv);
        registry
    }

    fn with_formats(formats: impl IntoIterator<Item = Format>, csv: &CsvSettings) -> Self {
        let mut registry = Self::empty();
        for format in formats {
            registry.register_format(format, csv);
        }
        registry
    }

    /// Registers one parser instance under every extension of a built-in format.
    pub fn register_format(&mut self, format: Format, csv: &CsvSettings) {
        let parser = format.parser(csv);
        for extension in format.extensions() {
            self.register(*extension, Arc::clone(&parser));
        }
    }

    /// Registers a parser for an extension, returning the parser it replaced.
    ///
    /// A missing leading dot is added, so `"xml"` and `".xml"` are the same key.
    pub fn register(
        &mut self,
        extension: impl Into<String>,
        parser: Arc<dyn Parser>,
    ) -> Option<Arc<dyn Parser>> {
        let extension = extension.into();
        let key = if extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };
        self.parsers.insert(key, parser)
    }

    /// Returns the parser for an extension token, if registered.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&dyn Parser> {
        self.parsers.get(extension).map(AsRef::as_ref)
    }

    /// Returns the parser for a path's own extension, if registered.
    #[must_use]
    pub fn for_path(&self, path: &Path) -> Option<&dyn Parser> {
        extension_token(path).and_then(|ext| self.get(&ext))
    }

    /// Returns `true` if the extension token is registered.
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.parsers.contains_key(extension)
    }

    /// Iterates over registered extension tokens in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
