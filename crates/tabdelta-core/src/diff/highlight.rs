//! Change highlighting metadata for renderers.
//!
//! A cell is flagged iff its rendered text contains [`CHANGE_MARKER`]. The
//! flag never alters the value; renderers decide how flagged cells look.

use crate::diff::cell::{DiffCell, CHANGE_MARKER};
use crate::diff::model::Table;

/// True iff `rendered` contains the change marker
pub fn marks_change(rendered: &str) -> bool {
    rendered.contains(CHANGE_MARKER)
}

/// True iff the rendered cell denotes a change
pub fn is_highlighted(cell: &DiffCell) -> bool {
    marks_change(&cell.render())
}

/// Flag grid aligned with `table.rows` and `table.columns`
pub fn highlight_mask(table: &Table<DiffCell>) -> Vec<Vec<bool>> {
    table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(is_highlighted).collect())
        .collect()
}

/// Number of flagged cells in `table`
pub fn count_highlighted(table: &Table<DiffCell>) -> usize {
    table
        .rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter(|cell| is_highlighted(cell))
        .count()
}
