//! Diff output types.
//!
//! Tables hold rows sorted by key tuple, so serialization is deterministic.

use crate::diff::cell::DiffCell;
use crate::errors::ExErrorKind;
use crate::model::{CellValue, KeyTuple};
use serde::{Deserialize, Serialize};

pub const REMOVED_ROWS: &str = "removed_rows";
pub const ADDED_ROWS: &str = "added_rows";
pub const CHANGED_ROWS: &str = "changed_rows";
pub const REMOVED_COLUMNS: &str = "removed_columns";
pub const ADDED_COLUMNS: &str = "added_columns";

/// A derived table indexed by key tuple.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Table<T> {
    /// Key column names, in key specification order
    pub index: Vec<String>,
    /// Value column names, aligned with each row's `cells`
    pub columns: Vec<String>,
    /// Rows in ascending key order
    pub rows: Vec<TableRow<T>>,
}

/// One table row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow<T> {
    pub key: KeyTuple,
    pub cells: Vec<T>,
}

impl<T> Table<T> {
    pub fn new(index: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            index,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyTuple> {
        self.rows.iter().map(|r| &r.key)
    }

    /// Row at `key`
    pub fn row(&self, key: &KeyTuple) -> Option<&TableRow<T>> {
        self.rows
            .binary_search_by(|r| r.key.cmp(key))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Cell at (`key`, `column`)
    pub fn cell(&self, key: &KeyTuple, column: &str) -> Option<&T> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.row(key).and_then(|r| r.cells.get(col))
    }
}

/// A non-fatal condition detected while diffing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum DiffWarning {
    /// The datasets share no key tuple; every row is added or removed
    EmptyCommonKeys,
    /// The datasets share no non-key column; changed rows carry no cells
    EmptyCommonColumns,
}

impl DiffWarning {
    pub fn kind(&self) -> ExErrorKind {
        ExErrorKind::EmptyIntersection
    }

    pub fn message(&self) -> &'static str {
        match self {
            DiffWarning::EmptyCommonKeys => "no key is present in both datasets",
            DiffWarning::EmptyCommonColumns => "no non-key column is present in both datasets",
        }
    }
}

/// Borrowed view of one named result table, for writers.
#[derive(Debug, Clone, Copy)]
pub enum TableRef<'a> {
    Values(&'a Table<CellValue>),
    Cells(&'a Table<DiffCell>),
}

impl TableRef<'_> {
    pub fn len(&self) -> usize {
        match self {
            TableRef::Values(t) => t.len(),
            TableRef::Cells(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete result of one diff.
///
/// `removed_columns` and `added_columns` are `None` (and omitted from the
/// serialized form) when the respective column set is empty.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiffResult {
    /// Old rows whose key is absent from the new dataset
    pub removed_rows: Table<CellValue>,
    /// New rows whose key is absent from the old dataset
    pub added_rows: Table<CellValue>,
    /// Common keys × common columns
    pub changed_rows: Table<DiffCell>,
    /// Old values of dropped columns at common keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_columns: Option<Table<CellValue>>,
    /// New values of introduced columns at common keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_columns: Option<Table<CellValue>>,
    /// Non-fatal conditions
    pub warnings: Vec<DiffWarning>,
}

impl DiffResult {
    /// Present tables in fixed order: removed rows, added rows, changed rows,
    /// removed columns, added columns
    pub fn named_tables(&self) -> Vec<(&'static str, TableRef<'_>)> {
        let mut tables = vec![
            (REMOVED_ROWS, TableRef::Values(&self.removed_rows)),
            (ADDED_ROWS, TableRef::Values(&self.added_rows)),
            (CHANGED_ROWS, TableRef::Cells(&self.changed_rows)),
        ];
        if let Some(t) = &self.removed_columns {
            tables.push((REMOVED_COLUMNS, TableRef::Values(t)));
        }
        if let Some(t) = &self.added_columns {
            tables.push((ADDED_COLUMNS, TableRef::Values(t)));
        }
        tables
    }

    /// True when nothing was added, removed or changed.
    ///
    /// This is a statement about values. An unchanged cell whose text
    /// happens to contain the change marker still counts as unchanged here,
    /// even though [`is_highlighted`](crate::diff::highlight::is_highlighted)
    /// flags it.
    pub fn is_unchanged(&self) -> bool {
        self.removed_rows.is_empty()
            && self.added_rows.is_empty()
            && self.removed_columns.is_none()
            && self.added_columns.is_none()
            && !self
                .changed_rows
                .rows
                .iter()
                .any(|r| r.cells.iter().any(DiffCell::is_changed))
    }
}
