//! Column definitions.
//!
//! A [`Column`] describes one presentable field of a record: an identifier,
//! a display header, a cell-rendering closure, and optionally the field the
//! column sorts by. Columns are caller-owned configuration and immutable
//! during a single render; visibility can be changed between renders through
//! view preferences.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Type alias for a cell-rendering function.
///
/// Produces the presentable value for one item. The rendering host is
/// expected to call this idempotently and without side effects.
pub type CellFn<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Describes one presentable field of a record.
pub struct Column<T> {
    id: String,
    header: String,
    cell: CellFn<T>,
    sorting_field: Option<String>,
    visible: bool,
}

impl<T> Column<T> {
    /// Creates a column with the given id, header label and cell function.
    ///
    /// The column is visible and not sortable until
    /// [`with_sorting_field`](Self::with_sorting_field) is set.
    pub fn new<F>(id: impl Into<String>, header: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            cell: Arc::new(cell),
            sorting_field: None,
            visible: true,
        }
    }

    /// Sets the field this column sorts by when its header is clicked.
    pub fn with_sorting_field(mut self, field: impl Into<String>) -> Self {
        self.sorting_field = Some(field.into());
        self
    }

    /// Sets the initial visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the column identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the sorting field, if the column is sortable.
    pub fn sorting_field(&self) -> Option<&str> {
        self.sorting_field.as_deref()
    }

    /// Returns whether the column is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Renders the cell value for one item.
    pub fn render(&self, item: &T) -> CellValue {
        (self.cell)(item)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: self.cell.clone(),
            sorting_field: self.sorting_field.clone(),
            visible: self.visible,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sorting_field", &self.sorting_field)
            .field("visible", &self.visible)
            .finish()
    }
}
