//! # Casekit
//!
//! Casebase loading for case-based reasoning.
//!
//! A casebase is a read-only mapping from case names to cases. Casekit builds
//! one from a single structured file, from a directory holding one case per
//! file, or from an in-memory table.
//!
//! ## Features
//!
//! - Extension-keyed parser registries for JSON, TOML, YAML, CSV and plain text
//! - Batch loading (one file is the whole casebase)
//! - Folder loading (one file per case, keyed by file name)
//! - A standalone XML loader
//! - Live, zero-copy casebase views over polars data frames
//!
//! ## Example
//!
//! ```rust,ignore
//! use casekit::{load_path, CaseView};
//!
//! let casebase = load_path("data/cars.csv", None)?;
//! for name in casebase.names() {
//!     println!("{name}");
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod table;

// Re-exports for convenience
pub use config::LoaderConfig;
pub use io::{Format, Loader, LoaderRegistry, Parser, load_data, load_path, load_xml};
pub use models::{CaseName, CaseView, Casebase, Record, Value};
pub use table::{DataFrame, IndexedFrame, Table, TableCasebase, load_dataframe};

/// Error type for casekit operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `NotFound` | The path passed to a loader is neither a file nor a directory |
/// | `UnsupportedFormat` | No parser for the extension, or a folder yielded no cases |
/// | `Io` | A file cannot be opened or read |
/// | `Json`, `Toml`, `Yaml`, `Csv`, `Xml` | The format parser rejected the content |
/// | `Table` | polars rejected a table operation |
/// | `Pattern` | The folder scan pattern is invalid |
/// | `InvalidDocument` | Parsed content has a shape that cannot form a casebase |
/// | `InvalidInput` | Bad CLI or configuration input |
/// | `OperationFailed` | Config loading or logging initialization fails |
///
/// Parser errors are wrapped transparently: their `Display` and `source()`
/// are exactly those of the underlying parser.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The path is neither a file nor a directory.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No parser is registered for the extension, or a folder scan yielded
    /// no loadable files.
    #[error("unsupported format for {}: {}", path.display(), extension.as_deref().unwrap_or("<no loadable files>"))]
    UnsupportedFormat {
        /// The path that was being loaded.
        path: PathBuf,
        /// The extension token that had no parser (`None` for empty folders).
        extension: Option<String>,
    },

    /// Reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed TOML.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Malformed YAML.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// CSV structural error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Malformed XML.
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    /// A data frame operation failed.
    #[error(transparent)]
    Table(#[from] polars::prelude::PolarsError),

    /// Invalid folder scan pattern.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// The content parsed, but its shape cannot be used as requested.
    #[error("invalid document in {}: {reason}", path.display())]
    InvalidDocument {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with the document.
        reason: String,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for casekit operations.
pub type Result<T> = std::result::Result<T, Error>;
