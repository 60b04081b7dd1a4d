//! Key indexing and key-set reconciliation.

use crate::errors::{Result, TabDeltaError};
use crate::model::{Dataset, KeySpec, KeyTuple, Row, Side};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Lookup from key tuple to row for one dataset.
///
/// Keys iterate in ascending key-tuple order.
#[derive(Debug)]
pub struct KeyIndex<'a> {
    rows: BTreeMap<KeyTuple, (usize, &'a Row)>,
}

impl<'a> KeyIndex<'a> {
    /// Index `dataset` by `key`.
    ///
    /// # Errors
    ///
    /// - `MissingKeyColumn`: a key column is not a column of `dataset`
    /// - `DuplicateKey`: two rows share a key tuple
    pub fn build(dataset: &'a Dataset, key: &KeySpec, side: Side) -> Result<Self> {
        ensure_key_columns(dataset, key, side)?;

        let mut rows: BTreeMap<KeyTuple, (usize, &'a Row)> = BTreeMap::new();
        for (position, row) in dataset.rows().iter().enumerate() {
            match rows.entry(key.tuple_of(row)) {
                Entry::Vacant(slot) => {
                    slot.insert((position, row));
                }
                Entry::Occupied(existing) => {
                    return Err(TabDeltaError::DuplicateKey {
                        key: existing.key().to_string(),
                        side,
                        first_row: existing.get().0,
                        second_row: position,
                    });
                }
            }
        }

        tracing::debug!(side = %side, rows = rows.len(), "key index built");
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &KeyTuple) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &KeyTuple) -> Option<&'a Row> {
        self.rows.get(key).map(|(_, row)| *row)
    }

    /// Original row position of `key` in the dataset
    pub fn position(&self, key: &KeyTuple) -> Option<usize> {
        self.rows.get(key).map(|(position, _)| *position)
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyTuple> {
        self.rows.keys()
    }

    /// Rows at `keys`, in the order given; keys absent from the index are skipped
    pub fn select<'k>(&self, keys: &'k [KeyTuple]) -> Vec<(&'k KeyTuple, &'a Row)> {
        keys.iter()
            .filter_map(|k| self.get(k).map(|row| (k, row)))
            .collect()
    }
}

/// Fail with `MissingKeyColumn` unless every key column is a column of `dataset`.
///
/// # Errors
///
/// `MissingKeyColumn` naming the first absent column and `side`.
pub fn ensure_key_columns(dataset: &Dataset, key: &KeySpec, side: Side) -> Result<()> {
    match key.columns().iter().find(|c| !dataset.has_column(c)) {
        Some(column) => Err(TabDeltaError::MissingKeyColumn {
            column: column.clone(),
            side,
        }),
        None => Ok(()),
    }
}

/// Key-set differences between an old and a new index.
///
/// Every list is sorted ascending by key tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDelta {
    /// Keys only in the old dataset
    pub removed: Vec<KeyTuple>,
    /// Keys only in the new dataset
    pub added: Vec<KeyTuple>,
    /// Keys in both datasets
    pub common: Vec<KeyTuple>,
}

impl KeyDelta {
    pub fn between(old: &KeyIndex<'_>, new: &KeyIndex<'_>) -> Self {
        let (common, removed): (Vec<KeyTuple>, Vec<KeyTuple>) =
            old.keys().cloned().partition(|k| new.contains(k));
        let added: Vec<KeyTuple> = new.keys().filter(|k| !old.contains(k)).cloned().collect();
        Self {
            removed,
            added,
            common,
        }
    }
}
