//! Tabular datasets.
//!
//! A [`Dataset`] is an ordered list of unique column names plus an ordered
//! list of rows. Each [`Row`] maps column name to [`CellValue`]; a declared
//! column with no entry in a row reads as [`CellValue::Missing`].

use crate::errors::{Result, TabDeltaError};
use crate::model::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

static MISSING: CellValue = CellValue::Missing;

/// Which of the two compared datasets something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The baseline dataset
    Old,
    /// The dataset being compared against the baseline
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

/// A single row: column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, builder style
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Value of `column`, or missing when the row has no entry for it
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(|k| k.as_str())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = TabDeltaError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Dataset::new(raw.columns, raw.rows)
    }
}

/// An ordered, validated table of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, validating its shape.
    ///
    /// # Errors
    ///
    /// - `DuplicateColumn`: a column name is declared twice
    /// - `UndeclaredColumn`: a row has a cell for a column not in `columns`
    pub fn new<C: Into<String>>(
        columns: impl IntoIterator<Item = C>,
        rows: Vec<Row>,
    ) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut declared: BTreeSet<&str> = BTreeSet::new();
        for column in &columns {
            if !declared.insert(column.as_str()) {
                return Err(TabDeltaError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }

        for (position, row) in rows.iter().enumerate() {
            if let Some(column) = row.column_names().find(|c| !declared.contains(c)) {
                return Err(TabDeltaError::UndeclaredColumn {
                    column: column.to_string(),
                    row: position,
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Build a dataset from positional records aligned with `columns`.
    ///
    /// Records shorter than `columns` are padded with missing values; extra
    /// trailing values are rejected as undeclared columns.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::new`].
    pub fn from_records<C, V, R>(
        columns: impl IntoIterator<Item = C>,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        C: Into<String>,
        V: Into<CellValue>,
        R: IntoIterator<Item = V>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut rows = Vec::new();
        for (position, record) in records.into_iter().enumerate() {
            let mut row = Row::new();
            for (i, value) in record.into_iter().enumerate() {
                let column = columns
                    .get(i)
                    .ok_or_else(|| TabDeltaError::UndeclaredColumn {
                        column: format!("#{}", i),
                        row: position,
                    })?;
                row.set(column.clone(), value);
            }
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
