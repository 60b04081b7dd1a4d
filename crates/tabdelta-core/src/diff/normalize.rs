//! Value normalization applied before comparison.

use crate::model::CellValue;

/// Canonicalize a cell for comparison.
///
/// Text loses leading and trailing whitespace; a NaN number becomes
/// missing. Everything else is returned unchanged.
pub fn normalize(value: &CellValue) -> CellValue {
    match value {
        CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
        CellValue::Number(n) if n.is_nan() => CellValue::Missing,
        other => other.clone(),
    }
}
