//! Polars data frames as tables.
//!
//! A bare [`DataFrame`] has no row index, so its rows are labelled by
//! position. [`IndexedFrame`] names one column as the index and labels rows
//! with that column's values instead.

use super::Table;
use crate::config::CsvSettings;
use crate::models::{CaseName, Record, Value};
use crate::{Error, Result};
use polars::prelude::{AnyValue, Column, CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use std::path::Path;

/// Reads a CSV file into a data frame, every column as text.
///
/// Cells are not type-inferred, matching the batch CSV parser, and empty
/// cells stay empty strings. Rows are labelled `"0"`, `"1"`, ... when the
/// frame is wrapped with [`crate::load_dataframe`].
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the path is not a file or
/// [`Error::Table`] if polars rejects the content.
pub fn read_csv(path: &Path, settings: &CsvSettings) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let parse_options = CsvParseOptions::default()
        .with_separator(settings.delimiter)
        .with_missing_is_null(false)
        .with_truncate_ragged_lines(true);

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    tracing::debug!(path = %path.display(), rows = frame.height(), "Read CSV table");
    Ok(frame)
}

/// Converts one polars cell to a case value.
///
/// Temporal and nested cells keep their display form.
fn cell_value(cell: AnyValue<'_>) -> Value {
    match cell {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::from(s),
        AnyValue::StringOwned(s) => Value::from(s.as_str()),
        AnyValue::Int8(n) => Value::Integer(n.into()),
        AnyValue::Int16(n) => Value::Integer(n.into()),
        AnyValue::Int32(n) => Value::Integer(n.into()),
        AnyValue::Int64(n) => Value::Integer(n),
        AnyValue::UInt8(n) => Value::Integer(n.into()),
        AnyValue::UInt16(n) => Value::Integer(n.into()),
        AnyValue::UInt32(n) => Value::Integer(n.into()),
        AnyValue::UInt64(n) => i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Integer),
        AnyValue::Float32(n) => Value::Float(n.into()),
        AnyValue::Float64(n) => Value::Float(n),
        other => Value::String(other.to_string()),
    }
}

/// Reads the cell at `position`, mapping out-of-range reads to null.
fn cell_at(column: &Column, position: usize) -> Value {
    column.get(position).map_or(Value::Null, cell_value)
}

/// Renders a cell as a row label.
fn label_text(cell: AnyValue<'_>) -> CaseName {
    match cell {
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

impl Table for DataFrame {
    fn row_count(&self) -> usize {
        self.height()
    }

    fn row_label(&self, position: usize) -> Option<CaseName> {
        (position < self.height()).then(|| position.to_string())
    }

    fn row(&self, position: usize) -> Option<Record> {
        if position >= self.height() {
            return None;
        }
        Some(
            self.get_columns()
                .iter()
                .map(|column| (column.name().to_string(), cell_at(column, position)))
                .collect(),
        )
    }

    fn position_of(&self, label: &str) -> Option<usize> {
        label
            .parse::<usize>()
            .ok()
            .filter(|&position| position < self.height() && position.to_string() == label)
    }
}

/// A data frame whose rows are labelled by one of its columns.
///
/// The index column supplies labels and is left out of each row record.
/// Labels need not be unique.
#[derive(Debug, Clone)]
pub struct IndexedFrame {
    frame: DataFrame,
    index: String,
}

impl IndexedFrame {
    /// Uses `index` as the label column of `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Table`] if the frame has no such column.
    pub fn new(frame: DataFrame, index: impl Into<String>) -> Result<Self> {
        let index = index.into();
        frame.column(&index)?;
        Ok(Self { frame, index })
    }

    /// Name of the index column.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The underlying frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Mutable access to the underlying frame.
    ///
    /// Dropping or renaming the index column makes every label lookup miss.
    pub fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    /// Unwraps the frame.
    #[must_use]
    pub fn into_inner(self) -> DataFrame {
        self.frame
    }
}

impl Table for IndexedFrame {
    fn row_count(&self) -> usize {
        self.frame.height()
    }

    fn row_label(&self, position: usize) -> Option<CaseName> {
        let column = self.frame.column(&self.index).ok()?;
        column.get(position).ok().map(label_text)
    }

    fn row(&self, position: usize) -> Option<Record> {
        if position >= self.frame.height() {
            return None;
        }
        Some(
            self.frame
                .get_columns()
                .iter()
                .filter(|column| column.name().as_str() != self.index)
                .map(|column| (column.name().to_string(), cell_at(column, position)))
                .collect(),
        )
    }
}
