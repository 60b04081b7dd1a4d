//! Key specifications and key tuples.
//!
//! Key tuples are totally ordered so that every key list the diff emits is
//! sorted: missing sorts before numbers, numbers before text. Numbers are
//! ordered by value. An integral float is stored as the exact integer it
//! holds (so `-0.0`, `0.0` and `0` are one key), other floats keep their
//! bits with all NaNs folded into one canonical NaN. Integers never pass
//! through `f64`, so distinct 64-bit ids stay distinct keys.

use crate::errors::{Result, TabDeltaError};
use crate::model::dataset::Row;
use crate::model::value::{cmp_integer_float, integral_value, CellValue};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// One or more column names identifying a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    columns: Vec<String>,
}

impl KeySpec {
    /// Build a key specification.
    ///
    /// # Errors
    ///
    /// `InvalidKeySpec` when no column is given or a column repeats.
    pub fn new<C: Into<String>>(columns: impl IntoIterator<Item = C>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(TabDeltaError::InvalidKeySpec {
                reason: "at least one key column is required".to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(TabDeltaError::InvalidKeySpec {
                    reason: format!("key column '{}' is listed more than once", column),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Single-column key
    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Extract the key tuple of `row`
    pub fn tuple_of(&self, row: &Row) -> KeyTuple {
        KeyTuple(
            self.columns
                .iter()
                .map(|c| KeyPart::from_cell(row.get(c)))
                .collect(),
        )
    }
}

/// One component of a key tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Missing,
    /// Exact integer, including integral floats
    Integer(i128),
    /// Canonicalized bits of a non-integral `f64`
    Number(u64),
    Text(String),
}

impl KeyPart {
    pub fn from_cell(value: &CellValue) -> Self {
        match value {
            CellValue::Missing => KeyPart::Missing,
            CellValue::Integer(i) => KeyPart::Integer(*i),
            CellValue::Number(n) => match integral_value(*n) {
                Some(i) => KeyPart::Integer(i),
                None => KeyPart::Number(canonical_bits(*n)),
            },
            CellValue::Text(s) => KeyPart::Text(s.clone()),
        }
    }

    pub fn to_cell(&self) -> CellValue {
        match self {
            KeyPart::Missing => CellValue::Missing,
            KeyPart::Integer(i) => CellValue::Integer(*i),
            KeyPart::Number(bits) => CellValue::Number(f64::from_bits(*bits)),
            KeyPart::Text(s) => CellValue::Text(s.clone()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            KeyPart::Missing => 0,
            KeyPart::Integer(_) | KeyPart::Number(_) => 1,
            KeyPart::Text(_) => 2,
        }
    }
}

fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Integer(a), KeyPart::Integer(b)) => a.cmp(b),
            (KeyPart::Number(a), KeyPart::Number(b)) => {
                f64::from_bits(*a).total_cmp(&f64::from_bits(*b))
            }
            (KeyPart::Integer(i), KeyPart::Number(bits)) => {
                cmp_integer_float(*i, f64::from_bits(*bits))
            }
            (KeyPart::Number(bits), KeyPart::Integer(i)) => {
                cmp_integer_float(*i, f64::from_bits(*bits)).reverse()
            }
            (KeyPart::Text(a), KeyPart::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_cell(), f)
    }
}

/// Ordered key-column values identifying one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyTuple(Vec<KeyPart>);

impl KeyTuple {
    pub fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    /// Build a tuple from cell values, mostly for lookups in tests and callers
    pub fn from_values<V: Into<CellValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| KeyPart::from_cell(&v.into()))
                .collect(),
        )
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn values(&self) -> Vec<CellValue> {
        self.0.iter().map(KeyPart::to_cell).collect()
    }
}

/// Single-part keys render bare, composite keys as `(a, b)`.
impl fmt::Display for KeyTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.0.as_slice() {
            return fmt::Display::fmt(only, f);
        }
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(part, f)?;
        }
        f.write_str(")")
    }
}

impl Serialize for KeyTuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values().serialize(serializer)
    }
}
