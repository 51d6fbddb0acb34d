//! CSV parser.
//!
//! The first row names the fields. Every data row becomes a record keyed by
//! its zero-based row index rendered as a string. Cells stay strings; no type
//! inference is attempted.

use super::Parser;
use crate::config::CsvSettings;
use crate::models::{Record, Value};
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parses a CSV file into `row index -> (column -> cell)`.
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::from_settings(&CsvSettings::default())
    }
}

impl CsvParser {
    /// Creates a CSV parser from settings.
    #[must_use]
    pub const fn from_settings(settings: &CsvSettings) -> Self {
        Self {
            delimiter: settings.delimiter,
            trim: settings.trim,
        }
    }

    /// Builds a `csv::Reader` with this parser's options.
    ///
    /// Rows may be ragged: missing trailing cells become [`Value::Null`] and
    /// surplus cells are dropped.
    fn reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader)
    }

    /// Parses CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] for structural or encoding errors.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Value> {
        let mut csv_reader = self.reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut rows = Record::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            rows.insert(index.to_string(), Value::Mapping(row_record(&headers, &record)));
        }

        Ok(Value::Mapping(rows))
    }
}

/// Zips headers with a row's cells.
fn row_record(headers: &csv::StringRecord, record: &csv::StringRecord) -> Record {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cell = record
                .get(i)
                .map_or(Value::Null, |cell| Value::String(cell.to_string()));
            (header.to_string(), cell)
        })
        .collect()
}

impl Parser for CsvParser {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(file)
    }
}
