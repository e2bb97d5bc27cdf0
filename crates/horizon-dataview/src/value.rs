//! Field values and null-safe ordering.
//!
//! [`CellValue`] is the type-erased container for everything the engine
//! extracts from a record: filter stages match against it, the sort stage
//! orders by it, and columns render cells with it. [`compare_values`]
//! provides the null-safe total order that sorting relies on.

use std::cmp::Ordering;

/// A type-erased field value extracted from a record.
///
/// `None` represents a missing or null field. The engine never throws on an
/// unexpected value kind: comparison falls back to string coercion so that
/// any pair of values has a defined, stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// No value (null/missing field).
    #[default]
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, CellValue::None)
    }

    /// Returns `true` if this contains a defined value.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces the value to its display string.
    ///
    /// This is the form free-text filtering matches against and the fallback
    /// used to order values of mismatched kinds. `None` coerces to the empty
    /// string.
    pub fn coerce_string(&self) -> String {
        match self {
            CellValue::None => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::Str(s) => s.clone(),
        }
    }
}

/// Compares two field values with a null-safe total order.
///
/// Rules, applied in order:
///
/// 1. Two `None` values are equal.
/// 2. `None` sorts *before* any defined value. Note that the sort stage
///    applies its descending flag only to the defined-vs-defined comparison,
///    so nulls group first under either direction (see
///    [`crate::sort`]).
/// 3. Defined values of the same kind use native ordering; integer and
///    float compare cross-kind as `f64`; any other mixed pair falls back to
///    string-coerced comparison so the order stays total.
///
/// Never panics. Float comparison uses `total_cmp`, so NaN has a defined
/// position rather than poisoning sort stability.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    use CellValue::*;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, _) => Ordering::Less,
        (_, None) => Ordering::Greater,
        (Bool(x), Bool(y)) => x.cmp(y),
        (Int(x), Int(y)) => x.cmp(y),
        (Float(x), Float(y)) => x.total_cmp(y),
        (Str(x), Str(y)) => x.cmp(y),
        (Int(x), Float(y)) => (*x as f64).total_cmp(y),
        (Float(x), Int(y)) => x.total_cmp(&(*y as f64)),
        // Mismatched kinds: arbitrary but stable tie-break.
        _ => a.coerce_string().cmp(&b.coerce_string()),
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Float(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(opt: Option<V>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::None,
        }
    }
}
