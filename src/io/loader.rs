//! Path dispatcher.
//!
//! Decides whether a path is a file or a directory and routes it:
//!
//! - **file**: the batch registry is consulted with the file's extension and
//!   the parsed value becomes the casebase
//! - **directory**: entries matching a glob pattern are parsed one by one with
//!   the single-record registry and keyed by file name
//!
//! Loading is all-or-nothing: the first parser error aborts the whole load.

use super::formats::{Parser, XmlParser, extension_token};
use super::registry::LoaderRegistry;
use crate::config::LoaderConfig;
use crate::models::{Casebase, Value};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::instrument;

/// Loads casebases from files and folders.
///
/// Holds the parser registries and configuration. A loader keeps no
/// reference to anything it returns, so one instance can be reused freely.
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    data: LoaderRegistry,
    batch: LoaderRegistry,
    single: LoaderRegistry,
}

impl Default for Loader {
    fn default() -> Self {
        Self::with_config(LoaderConfig::default())
    }
}

impl Loader {
    /// Creates a loader with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with the given configuration.
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            data: LoaderRegistry::data(&config.csv),
            batch: LoaderRegistry::batch(&config.csv),
            single: LoaderRegistry::single(&config.csv),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the batch registry (one file is a whole casebase).
    #[must_use]
    pub const fn batch_registry(&self) -> &LoaderRegistry {
        &self.batch
    }

    /// Returns the single-record registry (one file is one case).
    #[must_use]
    pub const fn single_registry(&self) -> &LoaderRegistry {
        &self.single
    }

    /// Registers a parser for a format that can hold a whole casebase.
    ///
    /// The parser is added to both the batch and the single-record registry,
    /// since every batch format is also a single-record format.
    pub fn register_batch(&mut self, extension: impl Into<String>, parser: Arc<dyn Parser>) {
        let extension = extension.into();
        self.single.register(extension.clone(), Arc::clone(&parser));
        self.batch.register(extension, parser);
    }

    /// Registers a parser for a format that only holds a single case.
    pub fn register_single(&mut self, extension: impl Into<String>, parser: Arc<dyn Parser>) {
        self.single.register(extension, parser);
    }

    /// Loads a casebase from a file or a directory.
    ///
    /// `pattern` is a glob relative to the directory; it is ignored for files
    /// and defaults to [`LoaderConfig::default_pattern`].
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the path is neither a file nor a directory
    /// - [`Error::UnsupportedFormat`] if a file has no batch parser or a
    ///   directory yields no loadable files
    /// - any parser error, unchanged
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_path(&self, path: impl AsRef<Path>, pattern: Option<&str>) -> Result<Casebase> {
        let path = path.as_ref();

        let casebase = if path.is_file() {
            self.load_file(path)?
        } else if path.is_dir() {
            self.load_folder(path, pattern.unwrap_or(&self.config.default_pattern))?
        } else {
            return Err(Error::NotFound(path.to_path_buf()));
        };

        tracing::info!(cases = casebase.len(), "Loaded casebase");
        Ok(casebase)
    }

    /// Loads a whole casebase from one file using the batch registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the extension has no batch
    /// parser, [`Error::InvalidDocument`] if the top level is neither a
    /// mapping nor a sequence, or the parser's error.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> Result<Casebase> {
        let extension = extension_token(path);
        let parser = extension
            .as_deref()
            .and_then(|ext| self.batch.get(ext))
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.clone(),
            })?;

        tracing::debug!(parser = parser.name(), "Parsing batch file");
        into_casebase(path, parser.parse(path)?)
    }

    /// Loads one case per file from a directory using the single-record registry.
    ///
    /// Each file is parsed with the parser registered for its own extension.
    /// Cases are keyed by file name; when two files in different
    /// subdirectories share a name, the later one in scan order wins.
    /// Entries the scan cannot read, such as subdirectories without
    /// permission, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an absolute pattern,
    /// [`Error::Pattern`] for a malformed one, [`Error::UnsupportedFormat`]
    /// if no file was loaded, or the first parser error.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load_folder(&self, path: &Path, pattern: &str) -> Result<Casebase> {
        let mut casebase = Casebase::new();

        for entry in glob::glob(&scan_pattern(path, pattern)?)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(entry = %e.path().display(), error = %e.error(), "Skipping unreadable folder entry");
                    continue;
                },
            };
            if !entry.is_file() {
                continue;
            }
            let Some(parser) = self.single.for_path(&entry) else {
                tracing::trace!(file = %entry.display(), "Skipping file without a parser");
                continue;
            };
            let Some(name) = entry.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };

            tracing::debug!(file = %entry.display(), parser = parser.name(), "Parsing case file");
            let case = parser.parse(&entry)?;
            if casebase.insert(name.clone(), case).is_some() {
                tracing::warn!(case = %name, file = %entry.display(), "Case name collision, keeping the later file");
            }
        }

        if casebase.is_empty() {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: None,
            });
        }

        Ok(casebase)
    }

    /// Loads a structured data file (`.json`, `.toml`, `.yaml`, `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the path is not a file,
    /// [`Error::UnsupportedFormat`] for any other extension, or the parser's
    /// error.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_data(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let parser = self
            .data
            .for_path(path)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension_token(path),
            })?;
        parser.parse(path)
    }
}

/// Converts a batch file's top-level value into a casebase.
///
/// Mappings keep their keys; sequences are keyed by position.
fn into_casebase(path: &Path, value: Value) -> Result<Casebase> {
    match value {
        Value::Mapping(cases) => Ok(Casebase::from(cases)),
        Value::Sequence(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, case)| (index.to_string(), case))
            .collect()),
        other => Err(Error::InvalidDocument {
            path: path.to_path_buf(),
            reason: format!(
                "top level is a {}, expected a mapping or sequence",
                other.kind()
            ),
        }),
    }
}

/// Joins a directory and a relative glob pattern, escaping the directory part.
fn scan_pattern(dir: &Path, pattern: &str) -> Result<String> {
    if Path::new(pattern).is_absolute() {
        return Err(Error::InvalidInput(format!(
            "folder scan pattern must be relative: {pattern}"
        )));
    }
    let escaped = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));
    Ok(escaped.join(pattern).to_string_lossy().into_owned())
}

/// Loads a casebase from a file or directory with the default configuration.
///
/// See [`Loader::load_path`].
///
/// # Errors
///
/// See [`Loader::load_path`].
pub fn load_path(path: impl AsRef<Path>, pattern: Option<&str>) -> Result<Casebase> {
    Loader::new().load_path(path, pattern)
}

/// Loads a structured data file with the default configuration.
///
/// # Errors
///
/// See [`Loader::load_data`].
pub fn load_data(path: impl AsRef<Path>) -> Result<Value> {
    Loader::new().load_data(path)
}

/// Loads an XML file into a value tree with the document element removed.
///
/// XML is not part of any registry; see [`XmlParser`] for the mapping rules.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the path is not a file, [`Error::Io`] if
/// it cannot be read, or [`Error::Xml`] for malformed content.
pub fn load_xml(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    XmlParser.parse(path)
}
