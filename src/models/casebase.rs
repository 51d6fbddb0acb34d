//! The casebase container and the read-only view contract it shares with
//! table-backed casebases.

use super::{Record, Value};
use indexmap::IndexMap;
use indexmap::map;
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Index;

/// Identifier of a case within a casebase.
///
/// Row indices for CSV batches, top-level keys for other batch formats, and
/// file names (with extension) for folder loads.
pub type CaseName = String;

/// Read-only mapping contract shared by every casebase representation.
///
/// Retrieval code consumes this trait so it does not care whether the cases
/// were parsed from disk ([`Casebase`]) or are read through from a table
/// ([`crate::TableCasebase`]).
pub trait CaseView {
    /// Number of cases.
    fn len(&self) -> usize;

    /// Returns `true` when there are no cases.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a case by name.
    fn case(&self, name: &str) -> Option<Cow<'_, Value>>;

    /// Iterates over case names in the view's order.
    fn case_names(&self) -> Box<dyn Iterator<Item = CaseName> + '_>;
}

/// A loaded casebase: case name to case.
///
/// Built once by a loader and owned by the caller afterwards. The loader
/// keeps no reference to it. Cases iterate in load order: file order for
/// batch files, scan order for folders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Casebase {
    cases: IndexMap<CaseName, Value>,
}

impl Casebase {
    /// Creates an empty casebase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: IndexMap::new(),
        }
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` when there are no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Looks up a case by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cases.get(name)
    }

    /// Returns `true` if a case with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cases.contains_key(name)
    }

    /// Iterates over case names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    /// Iterates over `(name, case)` pairs.
    pub fn iter(&self) -> map::Iter<'_, CaseName, Value> {
        self.cases.iter()
    }

    /// Copies every case out of a view into an owned casebase.
    ///
    /// Use this to detach from a live table view.
    #[must_use]
    pub fn snapshot(view: &dyn CaseView) -> Self {
        view.case_names()
            .filter_map(|name| {
                let case = view.case(&name)?.into_owned();
                Some((name, case))
            })
            .collect()
    }

    /// Consumes the casebase, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> Record {
        self.cases
    }

    /// Inserts a case, returning the case it replaced.
    ///
    /// A replaced case keeps its original position.
    pub(crate) fn insert(&mut self, name: impl Into<CaseName>, case: Value) -> Option<Value> {
        self.cases.insert(name.into(), case)
    }
}

impl CaseView for Casebase {
    fn len(&self) -> usize {
        self.cases.len()
    }

    fn case(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.cases.get(name).map(Cow::Borrowed)
    }

    fn case_names(&self) -> Box<dyn Iterator<Item = CaseName> + '_> {
        Box::new(self.cases.keys().cloned())
    }
}

impl From<Record> for Casebase {
    fn from(cases: Record) -> Self {
        Self { cases }
    }
}

impl<K: Into<CaseName>> FromIterator<(K, Value)> for Casebase {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Casebase {
    type Item = (CaseName, Value);
    type IntoIter = map::IntoIter<CaseName, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.into_iter()
    }
}

impl<'a> IntoIterator for &'a Casebase {
    type Item = (&'a CaseName, &'a Value);
    type IntoIter = map::Iter<'a, CaseName, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

impl Index<&str> for Casebase {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        &self.cases[name]
    }
}
