//! The record boundary: field access and row identity.
//!
//! The engine never inspects an item's shape directly. Callers implement
//! [`Record`] to expose fields by name, and configure a [`TrackBy`] so the
//! view can correlate rows across filter/sort/page recomputation and key
//! selection state.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Field access by name.
///
/// This is the only way the engine inspects an item. Filterable fields,
/// sorting fields and field-based track keys all resolve through it.
///
/// # Example
///
/// ```
/// use horizon_dataview::{CellValue, Record};
///
/// struct Course {
///     id: u32,
///     title: String,
/// }
///
/// impl Record for Course {
///     fn field(&self, name: &str) -> CellValue {
///         match name {
///             "id" => CellValue::from(self.id as i64),
///             "title" => CellValue::from(self.title.as_str()),
///             _ => CellValue::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of the named field.
    ///
    /// Return `CellValue::None` for unknown fields; the engine treats an
    /// unknown field like a null value rather than an error.
    fn field(&self, name: &str) -> CellValue;
}

/// The stable identity of a row.
///
/// Selection state and row correlation are keyed by `RowKey`, not by
/// position, so they survive re-filtering and re-sorting. Track keys must be
/// unique and stable per item for the lifetime of a render cycle; duplicate
/// keys make selection and row identity undefined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Creates a key from a field value via string coercion.
    pub fn from_value(value: &CellValue) -> Self {
        Self(value.coerce_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How rows are identified across recomputation.
///
/// Either a field name whose string-coerced value is the key (the common
/// case, typically `"id"`), or a caller closure for composite keys.
pub enum TrackBy<T> {
    /// Key is the string coercion of the named field.
    Field(String),
    /// Key is produced by a caller closure.
    With(Arc<dyn Fn(&T) -> RowKey + Send + Sync>),
}

impl<T: Record> TrackBy<T> {
    /// Tracks rows by the named field.
    pub fn field(name: impl Into<String>) -> Self {
        TrackBy::Field(name.into())
    }

    /// Tracks rows by a caller-supplied key function.
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&T) -> RowKey + Send + Sync + 'static,
    {
        TrackBy::With(Arc::new(f))
    }

    /// Computes the track key for an item.
    pub fn key_of(&self, item: &T) -> RowKey {
        match self {
            TrackBy::Field(name) => RowKey::from_value(&item.field(name)),
            TrackBy::With(f) => f(item),
        }
    }
}

impl<T> Clone for TrackBy<T> {
    fn clone(&self) -> Self {
        match self {
            TrackBy::Field(name) => TrackBy::Field(name.clone()),
            TrackBy::With(f) => TrackBy::With(f.clone()),
        }
    }
}

impl<T> fmt::Debug for TrackBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackBy::Field(name) => f.debug_tuple("TrackBy::Field").field(name).finish(),
            TrackBy::With(_) => f.write_str("TrackBy::With(..)"),
        }
    }
}
