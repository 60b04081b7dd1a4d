#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests for the diff invariants.

mod common;

use common::{id_key, table};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tabdelta_core::diff::{diff, highlight_mask, result_digest};
use tabdelta_core::model::{CellValue, Dataset, KeyTuple};

fn arb_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        (-3i64..3).prop_map(CellValue::from),
        "[ab ]{0,3}".prop_map(CellValue::Text),
    ]
}

/// Unique integer keys, each row with `name` and `score` cells
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::btree_map(0i64..20, (arb_cell(), arb_cell()), 0..10).prop_map(
        |rows: BTreeMap<i64, (CellValue, CellValue)>| {
            table(
                &["id", "name", "score"],
                rows.into_iter()
                    .map(|(id, (name, score))| vec![CellValue::from(id), name, score])
                    .collect(),
            )
        },
    )
}

/// Unique integer keys plus a random subset of the columns `a` to `d`
fn arb_dataset_with_columns() -> impl Strategy<Value = Dataset> {
    (
        prop::sample::subsequence(vec!["a", "b", "c", "d"], 0..=4),
        prop::collection::btree_map(0i64..20, prop::collection::vec(arb_cell(), 4), 0..10),
    )
        .prop_map(|(extra, rows): (Vec<&str>, BTreeMap<i64, Vec<CellValue>>)| {
            let mut columns = vec!["id"];
            columns.extend(extra.iter().copied());
            table(
                &columns,
                rows.into_iter()
                    .map(|(id, cells)| {
                        let mut record = vec![CellValue::from(id)];
                        record.extend(cells.into_iter().take(extra.len()));
                        record
                    })
                    .collect(),
            )
        })
}

fn key_set(data: &Dataset) -> BTreeSet<KeyTuple> {
    let key = id_key();
    data.rows().iter().map(|r| key.tuple_of(r)).collect()
}

proptest! {
    #[test]
    fn prop_identity_has_no_flagged_cells(data in arb_dataset()) {
        let result = diff(&data, &data, &id_key()).unwrap();
        prop_assert!(result.removed_rows.is_empty());
        prop_assert!(result.added_rows.is_empty());
        prop_assert!(result.removed_columns.is_none());
        prop_assert!(result.added_columns.is_none());
        prop_assert!(highlight_mask(&result.changed_rows).iter().flatten().all(|f| !f));
    }

    #[test]
    fn prop_swapping_inputs_swaps_removed_and_added(a in arb_dataset(), b in arb_dataset()) {
        let ab = diff(&a, &b, &id_key()).unwrap();
        let ba = diff(&b, &a, &id_key()).unwrap();
        let ab_removed: Vec<_> = ab.removed_rows.keys().cloned().collect();
        let ba_added: Vec<_> = ba.added_rows.keys().cloned().collect();
        prop_assert_eq!(ab_removed, ba_added);
        let ab_added: Vec<_> = ab.added_rows.keys().cloned().collect();
        let ba_removed: Vec<_> = ba.removed_rows.keys().cloned().collect();
        prop_assert_eq!(ab_added, ba_removed);
    }

    #[test]
    fn prop_swapping_inputs_swaps_removed_and_added_columns(
        a in arb_dataset_with_columns(),
        b in arb_dataset_with_columns(),
    ) {
        let ab = diff(&a, &b, &id_key()).unwrap();
        let ba = diff(&b, &a, &id_key()).unwrap();
        prop_assert_eq!(&ab.removed_columns, &ba.added_columns);
        prop_assert_eq!(&ab.added_columns, &ba.removed_columns);
        prop_assert_eq!(&ab.changed_rows.columns, &ba.changed_rows.columns);
    }

    #[test]
    fn prop_rows_partition_key_sets(a in arb_dataset(), b in arb_dataset()) {
        let result = diff(&a, &b, &id_key()).unwrap();
        let removed: BTreeSet<_> = result.removed_rows.keys().cloned().collect();
        let added: BTreeSet<_> = result.added_rows.keys().cloned().collect();
        let common: BTreeSet<_> = result.changed_rows.keys().cloned().collect();

        prop_assert!(removed.is_disjoint(&added));
        prop_assert_eq!(removed.union(&common).cloned().collect::<BTreeSet<_>>(), key_set(&a));
        prop_assert_eq!(added.union(&common).cloned().collect::<BTreeSet<_>>(), key_set(&b));
    }

    #[test]
    fn prop_key_lists_sorted(a in arb_dataset(), b in arb_dataset()) {
        let result = diff(&a, &b, &id_key()).unwrap();
        let changed: Vec<_> = result.changed_rows.keys().cloned().collect();
        let mut sorted = changed.clone();
        sorted.sort();
        prop_assert_eq!(changed, sorted);
    }

    #[test]
    fn prop_diff_is_deterministic(a in arb_dataset(), b in arb_dataset()) {
        let first = diff(&a, &b, &id_key()).unwrap();
        let second = diff(&a, &b, &id_key()).unwrap();
        prop_assert_eq!(result_digest(&first).unwrap(), result_digest(&second).unwrap());
        prop_assert_eq!(first, second);
    }
}
