//! Scalar cell values.
//!
//! A cell is one of a closed set of variants. Equality is explicit:
//!
//! - `Missing == Missing`, and missing never equals a value
//! - integers compare exactly; JSON integers are never routed through `f64`
//! - an integer equals a float only when the float is integral and holds
//!   exactly that integer (`5 == 5.0`, `2^53 + 1 != 2^53 as f64`)
//! - floats compare by IEEE `==`
//! - text compares byte-wise, and a number never equals a text value

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Bound (exclusive) on integral floats that map to an exact `i128`
const I128_FLOAT_BOUND: f64 = 1.7014118346046923e38;

/// A single scalar cell value.
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    /// Empty cell
    #[default]
    Missing,
    /// Exact integer cell
    Integer(i128),
    /// Floating-point cell
    Number(f64),
    /// Textual cell
    Text(String),
}

impl CellValue {
    /// Build a text cell
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Build a numeric cell
    pub fn number(n: f64) -> Self {
        CellValue::Number(n)
    }

    /// Build an exact integer cell
    pub fn integer(n: impl Into<i128>) -> Self {
        CellValue::Integer(n.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// The exact integer held by `f`, if `f` is integral and within `i128` range
pub(crate) fn integral_value(f: f64) -> Option<i128> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < I128_FLOAT_BOUND {
        Some(f as i128)
    } else {
        None
    }
}

/// Order an integer against a float that is not integral (or out of range).
///
/// Never returns `Equal`; a positive NaN sorts after every integer and a
/// negative NaN before, matching `f64::total_cmp`.
pub(crate) fn cmp_integer_float(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= I128_FLOAT_BOUND {
        return Ordering::Less;
    }
    if f <= -I128_FLOAT_BOUND {
        return Ordering::Greater;
    }
    if i <= f.floor() as i128 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => true,
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Number(a), CellValue::Number(b)) => a == b,
            (CellValue::Integer(i), CellValue::Number(f))
            | (CellValue::Number(f), CellValue::Integer(i)) => integral_value(*f) == Some(*i),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// Renders the value as it appears in a report; missing renders empty.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(i128::from(n))
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Integer(i128::from(n))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Missing => serializer.serialize_none(),
            CellValue::Integer(n) => {
                if let Ok(v) = i64::try_from(*n) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(*n) {
                    serializer.serialize_u64(v)
                } else {
                    // Beyond 64 bits, fall back to the nearest float.
                    serializer.serialize_f64(*n as f64)
                }
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a number, a string or a boolean")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Missing)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<CellValue, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CellValue, E> {
        Ok(CellValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_equals_missing() {
        assert_eq!(CellValue::Missing, CellValue::Missing);
    }

    #[test]
    fn test_missing_never_equals_value() {
        assert_ne!(CellValue::Missing, CellValue::text(""));
        assert_ne!(CellValue::Missing, CellValue::number(0.0));
    }

    #[test]
    fn test_number_and_text_are_incomparable() {
        assert_ne!(CellValue::number(5.0), CellValue::text("5"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::number(5.0).to_string(), "5");
        assert_eq!(CellValue::number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::text("Ann").to_string(), "Ann");
    }

    #[test]
    fn test_deserialize_json_scalars() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, 3, -1, 1.5, "x", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Missing,
                CellValue::integer(3),
                CellValue::integer(-1),
                CellValue::number(1.5),
                CellValue::text("x"),
                CellValue::text("true"),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_nested_values() {
        assert!(serde_json::from_str::<CellValue>("[1]").is_err());
        assert!(serde_json::from_str::<CellValue>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_serialize_missing_as_null() {
        let json = serde_json::to_string(&vec![CellValue::Missing, CellValue::text("a")]).unwrap();
        assert_eq!(json, r#"[null,"a"]"#);
    }

    #[test]
    fn test_json_integers_stay_exact() {
        let values: Vec<CellValue> =
            serde_json::from_str("[9007199254740992, 9007199254740993, 18446744073709551615]")
                .unwrap();
        assert_eq!(values[0], CellValue::integer(9_007_199_254_740_992i64));
        assert_eq!(values[1], CellValue::integer(9_007_199_254_740_993i64));
        assert_ne!(values[0], values[1]);
        assert_eq!(values[2], CellValue::integer(u64::MAX));
        assert_eq!(values[1].to_string(), "9007199254740993");

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[9007199254740992,9007199254740993,18446744073709551615]");
    }

    #[test]
    fn test_integer_equals_float_only_when_exact() {
        assert_eq!(CellValue::integer(5), CellValue::number(5.0));
        assert_eq!(CellValue::number(-0.0), CellValue::integer(0));
        assert_ne!(CellValue::integer(5), CellValue::number(5.5));
        // 2^53 + 1 has no f64 representation; the nearest float is 2^53.
        assert_ne!(
            CellValue::integer(9_007_199_254_740_993i64),
            CellValue::number(9_007_199_254_740_992.0)
        );
        assert_ne!(CellValue::integer(1), CellValue::number(f64::NAN));
        assert_ne!(CellValue::integer(5), CellValue::text("5"));
    }

    #[test]
    fn test_cmp_integer_float() {
        assert_eq!(cmp_integer_float(1, 1.5), Ordering::Less);
        assert_eq!(cmp_integer_float(2, 1.5), Ordering::Greater);
        assert_eq!(cmp_integer_float(-2, -1.5), Ordering::Less);
        assert_eq!(cmp_integer_float(-1, -1.5), Ordering::Greater);
        assert_eq!(cmp_integer_float(i128::MAX, f64::INFINITY), Ordering::Less);
        assert_eq!(cmp_integer_float(i128::MIN, f64::NEG_INFINITY), Ordering::Greater);
        assert_eq!(cmp_integer_float(0, f64::NAN), Ordering::Less);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Missing);
        assert_eq!(CellValue::from(Some("a")), CellValue::text("a"));
    }
}
