//! Cell-level comparison.
//!
//! A changed cell renders as `"<old> ---> <new>"`. Downstream consumers
//! find changes by searching for [`CHANGE_MARKER`], so the rendering is
//! fixed: three hyphens and `>`, one space on each side, missing operands
//! rendered as the empty string.

use crate::model::CellValue;
use serde::{Serialize, Serializer};
use std::fmt;

/// Token separating old and new values in a changed cell
pub const CHANGE_MARKER: &str = "--->";

/// Result of comparing one old/new cell pair.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffCell {
    /// Both sides hold the same (normalized) value
    Same(CellValue),
    /// The sides differ
    Changed { old: CellValue, new: CellValue },
}

impl DiffCell {
    pub fn is_changed(&self) -> bool {
        matches!(self, DiffCell::Changed { .. })
    }

    /// Reportable text of the cell
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DiffCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffCell::Same(value) => fmt::Display::fmt(value, f),
            DiffCell::Changed { old, new } => write!(f, "{} {} {}", old, CHANGE_MARKER, new),
        }
    }
}

/// Unchanged cells serialize as their scalar, changed cells as the rendered string.
impl Serialize for DiffCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiffCell::Same(value) => value.serialize(serializer),
            DiffCell::Changed { .. } => serializer.collect_str(self),
        }
    }
}

/// Compare an already-normalized pair.
///
/// Total over all inputs: missing/missing is unchanged, and a number
/// against text is a change rather than an error.
pub fn diff_cell(old: CellValue, new: CellValue) -> DiffCell {
    if old == new {
        DiffCell::Same(old)
    } else {
        DiffCell::Changed { old, new }
    }
}
