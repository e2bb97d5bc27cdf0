//! A generic tabular data-view engine.
//!
//! `horizon-dataview` takes an arbitrary, strongly-typed collection of
//! records plus a declarative column/behavior configuration and produces a
//! filtered, sorted, paginated, selectable view of that collection. It is
//! independent of where the records came from and of how each cell is
//! rendered: the engine receives data and configuration, and emits a view
//! plus change signals. It never performs I/O.
//!
//! # Core Types
//!
//! - [`Record`]: field access by name, the only way the engine inspects an item
//! - [`CellValue`]: type-erased field value with a null-safe total order
//! - [`Column`]: one presentable field (id, header, cell closure, sort field)
//! - [`FilterQuery`]: free-text or property-token filtering criteria
//! - [`SortState`] / [`PageState`]: the sort and pagination slices of state
//! - [`SelectionModel`]: key-based selection under none/single/multi policy
//! - [`CollectionView`]: the orchestrating controller that owns all view
//!   state and re-runs the pipeline on every event
//!
//! # Pipeline
//!
//! ```text
//! items ──> Filtering ──> Sorting ──> Pagination ──> page
//!                 (index mapping: Vec<usize> into the source collection)
//! ```
//!
//! The pipeline is strictly linear and synchronous. Selection is an
//! orthogonal piece of state keyed by item identity (the track key), not
//! position, so it survives re-filtering and re-sorting.
//!
//! # Example
//!
//! ```
//! use horizon_dataview::{
//!     CellValue, CollectionView, Column, Record, SelectionMode, TrackBy, ViewConfig,
//! };
//!
//! struct Course {
//!     id: u32,
//!     title: String,
//!     credits: i64,
//! }
//!
//! impl Record for Course {
//!     fn field(&self, name: &str) -> CellValue {
//!         match name {
//!             "id" => CellValue::from(self.id as i64),
//!             "title" => CellValue::from(self.title.as_str()),
//!             "credits" => CellValue::from(self.credits),
//!             _ => CellValue::None,
//!         }
//!     }
//! }
//!
//! let config = ViewConfig::new(
//!     vec![
//!         Column::new("title", "Title", |c: &Course| CellValue::from(c.title.as_str()))
//!             .with_sorting_field("title"),
//!         Column::new("credits", "Credits", |c: &Course| CellValue::from(c.credits)),
//!     ],
//!     TrackBy::field("id"),
//! )
//! .with_selection_mode(SelectionMode::Multi)
//! .with_filterable_fields(["title"]);
//!
//! let mut view = CollectionView::new(config);
//! view.replace_items(vec![
//!     Course { id: 1, title: "Biology".into(), credits: 4 },
//!     Course { id: 2, title: "Chemistry".into(), credits: 3 },
//! ]);
//!
//! view.set_filter_text("bio");
//! assert_eq!(view.filtered_count(), 1);
//! assert_eq!(view.page_items()[0].id, 1);
//! ```

pub mod column;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use column::{CellFn, Column};
pub use filter::{FilterOperation, FilterOperator, FilterQuery, FilterToken};
pub use paginate::{DEFAULT_PAGE_SIZE, PageState};
pub use record::{Record, RowKey, TrackBy};
pub use selection::{SelectionMode, SelectionModel};
pub use sort::SortState;
pub use value::{CellValue, compare_values};
pub use view::{CollectionView, ViewConfig, ViewPreferences, ViewSignals, ViewSnapshot};

// Re-export the signal types callers need to hold connections.
pub use horizon_dataview_core::{ConnectionGuard, ConnectionId, Signal};
