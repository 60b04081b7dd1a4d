//! Diff assembly engine.
//!
//! The entry points are [`diff`] and [`diff_with_options`], which borrow two
//! datasets and a key specification and return a freshly built
//! [`DiffResult`]. Structural problems (missing key columns, duplicate keys)
//! abort before any table is built.

use crate::diff::cell::{diff_cell, DiffCell};
use crate::diff::columns::{content_columns, reconcile_columns};
use crate::diff::highlight::count_highlighted;
use crate::diff::index::{ensure_key_columns, KeyDelta, KeyIndex};
use crate::diff::model::{DiffResult, DiffWarning, Table, TableRow};
use crate::diff::normalize::normalize;
use crate::errors::{ExError, Result};
use crate::model::{CellValue, Dataset, KeySpec, KeyTuple, Side};
use crate::options::DiffOptions;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;
use tabdelta_core_types::RequestId;

const OP_DIFF: &str = "diff";

/// Diff `old` against `new` with default options.
///
/// # Errors
///
/// See [`diff_with_options`].
pub fn diff(old: &Dataset, new: &Dataset, key: &KeySpec) -> std::result::Result<DiffResult, ExError> {
    diff_with_options(old, new, key, &DiffOptions::default())
}

/// Diff `old` against `new`, aligning rows on `key`.
///
/// Inputs are never modified. Empty common keys or columns are reported in
/// [`DiffResult::warnings`] rather than failing.
///
/// # Errors
///
/// - `MissingKeyColumn`: a key column is absent from either dataset
/// - `DuplicateKey`: a key tuple repeats within either dataset
pub fn diff_with_options(
    old: &Dataset,
    new: &Dataset,
    key: &KeySpec,
    options: &DiffOptions,
) -> std::result::Result<DiffResult, ExError> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("diff", request_id = %request_id);
    let _entered = span.enter();
    let started = Instant::now();

    log_op_start!(
        OP_DIFF,
        old_rows = old.len(),
        new_rows = new.len(),
        key_columns = ?key.columns()
    );

    match assemble(old, new, key, options) {
        Ok(result) => {
            log_op_end!(
                OP_DIFF,
                duration_ms = elapsed_ms(started),
                removed_rows = result.removed_rows.len(),
                added_rows = result.added_rows.len(),
                changed_cells = count_highlighted(&result.changed_rows)
            );
            Ok(result)
        }
        Err(err) => {
            log_op_error!(
                OP_DIFF,
                err.clone(),
                duration_ms = elapsed_ms(started),
                request_id = %request_id
            );
            Err(ExError::from(err)
                .with_op(OP_DIFF)
                .with_request_id(request_id))
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn assemble(
    old: &Dataset,
    new: &Dataset,
    key: &KeySpec,
    options: &DiffOptions,
) -> Result<DiffResult> {
    // Both sides are checked before either index is built.
    ensure_key_columns(old, key, Side::Old)?;
    ensure_key_columns(new, key, Side::New)?;

    let old_index = KeyIndex::build(old, key, Side::Old)?;
    let new_index = KeyIndex::build(new, key, Side::New)?;

    let keys = KeyDelta::between(&old_index, &new_index);
    let columns = reconcile_columns(old.columns(), new.columns(), key, options.column_order);

    let mut warnings = Vec::new();
    if keys.common.is_empty() {
        tracing::warn!(op = OP_DIFF, "no common keys; every row is added or removed");
        warnings.push(DiffWarning::EmptyCommonKeys);
    }
    if columns.common.is_empty() {
        tracing::warn!(op = OP_DIFF, "no common non-key columns");
        warnings.push(DiffWarning::EmptyCommonColumns);
    }

    tracing::debug!(
        removed = keys.removed.len(),
        added = keys.added.len(),
        common = keys.common.len(),
        common_columns = columns.common.len(),
        "keys and columns reconciled"
    );

    let index_names = key.columns().to_vec();

    let removed_rows = value_table(
        &old_index,
        &keys.removed,
        &index_names,
        content_columns(old.columns(), key),
        CellValue::clone,
    );
    let added_rows = value_table(
        &new_index,
        &keys.added,
        &index_names,
        content_columns(new.columns(), key),
        CellValue::clone,
    );

    let changed_rows = changed_table(
        &old_index,
        &new_index,
        &keys.common,
        &index_names,
        &columns.common,
        options.changed_rows_only,
    );

    let removed_columns = (!columns.removed.is_empty()).then(|| {
        value_table(
            &old_index,
            &keys.common,
            &index_names,
            columns.removed.clone(),
            normalize,
        )
    });
    let added_columns = (!columns.added.is_empty()).then(|| {
        value_table(
            &new_index,
            &keys.common,
            &index_names,
            columns.added.clone(),
            normalize,
        )
    });

    Ok(DiffResult {
        removed_rows,
        added_rows,
        changed_rows,
        removed_columns,
        added_columns,
        warnings,
    })
}

/// Project `columns` of the rows at `keys`, mapping each value through `project`.
fn value_table(
    index: &KeyIndex<'_>,
    keys: &[KeyTuple],
    index_names: &[String],
    columns: Vec<String>,
    project: fn(&CellValue) -> CellValue,
) -> Table<CellValue> {
    let rows = index
        .select(keys)
        .into_iter()
        .map(|(key, row)| TableRow {
            key: key.clone(),
            cells: columns.iter().map(|c| project(row.get(c))).collect(),
        })
        .collect();
    Table {
        index: index_names.to_vec(),
        columns,
        rows,
    }
}

/// For each common key, for each common column, apply the cell differ.
fn changed_table(
    old_index: &KeyIndex<'_>,
    new_index: &KeyIndex<'_>,
    common: &[KeyTuple],
    index_names: &[String],
    columns: &[String],
    changed_rows_only: bool,
) -> Table<DiffCell> {
    let mut table = Table::new(index_names.to_vec(), columns.to_vec());
    for key in common {
        let (Some(old_row), Some(new_row)) = (old_index.get(key), new_index.get(key)) else {
            continue;
        };
        let cells: Vec<DiffCell> = columns
            .iter()
            .map(|c| diff_cell(normalize(old_row.get(c)), normalize(new_row.get(c))))
            .collect();
        if changed_rows_only && !cells.iter().any(DiffCell::is_changed) {
            continue;
        }
        table.rows.push(TableRow {
            key: key.clone(),
            cells,
        });
    }
    table
}
