//! Column reconciliation.

use crate::model::KeySpec;
use crate::options::ColumnOrder;
use std::collections::BTreeSet;

/// Column-set differences between an old and a new dataset, key columns excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDelta {
    /// Non-key columns present in both datasets
    pub common: Vec<String>,
    /// Non-key columns only in the old dataset
    pub removed: Vec<String>,
    /// Non-key columns only in the new dataset
    pub added: Vec<String>,
}

impl ColumnDelta {
    pub fn has_column_changes(&self) -> bool {
        !self.removed.is_empty() || !self.added.is_empty()
    }
}

/// Reconcile column lists.
///
/// With [`ColumnOrder::Lexical`] every list is sorted by name. With
/// [`ColumnOrder::Original`] `common` and `removed` follow `old`'s order and
/// `added` follows `new`'s order.
pub fn reconcile_columns(
    old: &[String],
    new: &[String],
    key: &KeySpec,
    order: ColumnOrder,
) -> ColumnDelta {
    let old_set: BTreeSet<&str> = old.iter().map(|s| s.as_str()).collect();
    let new_set: BTreeSet<&str> = new.iter().map(|s| s.as_str()).collect();

    let content = |c: &&String| !key.contains(c);

    let mut common: Vec<String> = old
        .iter()
        .filter(content)
        .filter(|c| new_set.contains(c.as_str()))
        .cloned()
        .collect();
    let mut removed: Vec<String> = old
        .iter()
        .filter(content)
        .filter(|c| !new_set.contains(c.as_str()))
        .cloned()
        .collect();
    let mut added: Vec<String> = new
        .iter()
        .filter(content)
        .filter(|c| !old_set.contains(c.as_str()))
        .cloned()
        .collect();

    if order == ColumnOrder::Lexical {
        common.sort();
        removed.sort();
        added.sort();
    }

    ColumnDelta {
        common,
        removed,
        added,
    }
}

/// Non-key columns of `columns` in their original order
pub fn content_columns(columns: &[String], key: &KeySpec) -> Vec<String> {
    columns.iter().filter(|c| !key.contains(c)).cloned().collect()
}
