//! Live casebase view over a table.

use super::Table;
use crate::models::{CaseName, CaseView, Record, Value};
use std::borrow::Cow;
use std::iter::FusedIterator;

/// A casebase that reads through to a table instead of copying it.
///
/// Every call consults the wrapped table, so the view reflects the table's
/// current state. No label uniqueness is enforced; label lookup returns the
/// first matching row.
#[derive(Debug, Clone)]
pub struct TableCasebase<T: Table> {
    table: T,
}

/// Wraps a table as a casebase without copying it.
///
/// # Example
///
/// ```rust
/// use casekit::{CaseView, IndexedFrame, Value, load_dataframe};
/// use polars::df;
///
/// let frame = df!("model" => ["golf"], "make" => ["vw"]).unwrap();
/// let indexed = IndexedFrame::new(frame, "model").unwrap();
///
/// let casebase = load_dataframe(&indexed);
/// assert_eq!(casebase.len(), 1);
/// assert_eq!(casebase.case_names().collect::<Vec<_>>(), vec!["golf".to_string()]);
/// assert_eq!(casebase.get("golf").unwrap()["make"], Value::from("vw"));
/// ```
pub const fn load_dataframe<T: Table>(table: T) -> TableCasebase<T> {
    TableCasebase { table }
}

impl<T: Table> TableCasebase<T> {
    /// Current number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row at an integer position.
    #[must_use]
    pub fn row_at(&self, position: usize) -> Option<Record> {
        self.table.row(position)
    }

    /// The first row carrying `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Record> {
        self.table
            .position_of(label)
            .and_then(|position| self.table.row(position))
    }

    /// Iterates over row labels in the table's current order.
    ///
    /// Each step reads the table, so the iterator stops early if rows are
    /// removed while it is in use. Once it has returned `None` it stays
    /// exhausted, even if rows are appended later.
    pub const fn labels(&self) -> Labels<'_, T> {
        Labels {
            table: &self.table,
            position: 0,
            done: false,
        }
    }

    /// The wrapped table.
    #[must_use]
    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Unwraps the view, returning the table handle.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.table
    }
}

impl<T: Table> CaseView for TableCasebase<T> {
    fn len(&self) -> usize {
        self.table.row_count()
    }

    fn case(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(|record| Cow::Owned(Value::Mapping(record)))
    }

    fn case_names(&self) -> Box<dyn Iterator<Item = CaseName> + '_> {
        Box::new(self.labels())
    }
}

/// Iterator over a table's row labels, read lazily.
#[derive(Debug)]
pub struct Labels<'a, T: Table> {
    table: &'a T,
    position: usize,
    done: bool,
}

impl<T: Table> Iterator for Labels<'_, T> {
    type Item = CaseName;

    fn next(&mut self) -> Option<CaseName> {
        if self.done {
            return None;
        }
        let Some(label) = self.table.row_label(self.position) else {
            self.done = true;
            return None;
        };
        self.position += 1;
        Some(label)
    }
}

impl<T: Table> FusedIterator for Labels<'_, T> {}
