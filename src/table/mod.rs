//! Tables as casebases.
//!
//! [`load_dataframe`] wraps a table in a [`TableCasebase`], a **live view**:
//! it holds no copy of the rows. Length, lookup and iteration read the table
//! at call time, so a view over a shared table reflects rows appended or
//! removed through another handle. This differs from [`crate::Casebase`],
//! which is a snapshot owned by the caller.
//!
//! Tables are polars [`DataFrame`]s. A bare frame labels rows by position;
//! [`IndexedFrame`] takes labels from an index column.
//!
//! Whether the view borrows or shares the table is chosen by the caller:
//!
//! | Wrapped as | Ownership |
//! |------------|-----------|
//! | `&DataFrame` | borrowed for the view's lifetime |
//! | `Arc<DataFrame>` | shared, read-only |
//! | `Arc<RwLock<DataFrame>>` | shared, mutable through other handles |

mod frame;
mod view;

pub use frame::{IndexedFrame, read_csv};
pub use polars::prelude::DataFrame;
pub use view::{Labels, TableCasebase, load_dataframe};

use crate::models::{CaseName, Record};
use std::sync::{Arc, PoisonError, RwLock};

/// Row-oriented read access to a labelled table.
pub trait Table {
    /// Current number of rows.
    fn row_count(&self) -> usize;

    /// Label of the row at `position`.
    fn row_label(&self, position: usize) -> Option<CaseName>;

    /// The row at `position` as a field-name to value record.
    fn row(&self, position: usize) -> Option<Record>;

    /// Position of the first row carrying `label`.
    fn position_of(&self, label: &str) -> Option<usize> {
        (0..self.row_count()).find(|&position| self.row_label(position).as_deref() == Some(label))
    }
}

impl<T: Table + ?Sized> Table for &T {
    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn row_label(&self, position: usize) -> Option<CaseName> {
        (**self).row_label(position)
    }

    fn row(&self, position: usize) -> Option<Record> {
        (**self).row(position)
    }

    fn position_of(&self, label: &str) -> Option<usize> {
        (**self).position_of(label)
    }
}

impl<T: Table + ?Sized> Table for Arc<T> {
    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn row_label(&self, position: usize) -> Option<CaseName> {
        (**self).row_label(position)
    }

    fn row(&self, position: usize) -> Option<Record> {
        (**self).row(position)
    }

    fn position_of(&self, label: &str) -> Option<usize> {
        (**self).position_of(label)
    }
}

// A poisoned lock still holds a structurally valid table; reads proceed.
impl<T: Table> Table for RwLock<T> {
    fn row_count(&self) -> usize {
        self.read().unwrap_or_else(PoisonError::into_inner).row_count()
    }

    fn row_label(&self, position: usize) -> Option<CaseName> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .row_label(position)
    }

    fn row(&self, position: usize) -> Option<Record> {
        self.read().unwrap_or_else(PoisonError::into_inner).row(position)
    }

    fn position_of(&self, label: &str) -> Option<usize> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .position_of(label)
    }
}
