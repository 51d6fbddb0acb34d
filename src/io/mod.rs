//! Casebase loading.
//!
//! # Architecture
//!
//! - **Format parsers** implement [`Parser`]: one file in, one [`crate::Value`] out
//! - **Registries** map extension tokens to parsers ([`LoaderRegistry`])
//! - **The loader** dispatches a path to a file or folder strategy ([`Loader`])
//!
//! # Supported Formats
//!
//! | Extension | Batch file | Folder entry | Notes |
//! |-----------|------------|--------------|-------|
//! | `.json` | ✓ | ✓ | Top-level arrays are keyed by position |
//! | `.toml` | ✓ | ✓ | |
//! | `.yaml`, `.yml` | ✓ | ✓ | Document streams are merged |
//! | `.csv` | ✓ | ✓ | Rows keyed by index, cells are strings |
//! | `.txt` | - | ✓ | Whole file is one string |
//!
//! XML is read by [`load_xml`] only. It joins a registry when a caller
//! registers [`formats::XmlParser`] for an extension.
//!
//! # Examples
//!
//! ```rust,ignore
//! use casekit::io::Loader;
//!
//! let loader = Loader::new();
//! let cars = loader.load_path("data/cars.csv", None)?;
//! let docs = loader.load_path("data/docs", Some("**/*.txt"))?;
//! ```

pub mod formats;
pub mod loader;
pub mod registry;

pub use formats::{Format, Parser, extension_token};
pub use loader::{Loader, load_data, load_path, load_xml};
pub use registry::LoaderRegistry;
