//! The view controller.
//!
//! [`CollectionView`] owns every piece of view state (the source items, the
//! filter criterion, the sort state, the page state, the selection) and
//! re-runs the filter -> sort -> paginate pipeline whenever an event changes
//! one of them. Callers read the result through [`page_items`]
//! (the current page, in order) and [`snapshot`] (the derived counters),
//! and observe changes through [`ViewSignals`].
//!
//! [`page_items`]: CollectionView::page_items
//! [`snapshot`]: CollectionView::snapshot
//!
//! # Event handling
//!
//! Every mutating method recomputes synchronously before returning, so reads
//! issued after an event always observe the post-event view. Filter changes
//! reset to page 1; sort and data changes keep the page index but clamp it
//! into the valid range for the new filtered count.

use std::collections::HashSet;

use horizon_dataview_core::Signal;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::filter::{self, FilterQuery};
use crate::paginate::{self, DEFAULT_PAGE_SIZE, PageState};
use crate::record::{Record, RowKey, TrackBy};
use crate::selection::{SelectionMode, SelectionModel};
use crate::sort::{self, SortState};

/// Declarative configuration for a [`CollectionView`].
///
/// Columns and the track-by rule are required; everything else has a
/// default (no selection, no filterable fields, unsorted, page size
/// [`DEFAULT_PAGE_SIZE`]).
pub struct ViewConfig<T> {
    columns: Vec<Column<T>>,
    track_by: TrackBy<T>,
    selection_mode: SelectionMode,
    filterable_fields: Vec<String>,
    default_sort: SortState,
    page_size: usize,
}

impl<T: Record> ViewConfig<T> {
    /// Creates a configuration from the column set and track-by rule.
    pub fn new(columns: Vec<Column<T>>, track_by: TrackBy<T>) -> Self {
        Self {
            columns,
            track_by,
            selection_mode: SelectionMode::default(),
            filterable_fields: Vec::new(),
            default_sort: SortState::unsorted(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the selection policy.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Declares the fields free-text filtering searches.
    pub fn with_filterable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sort applied before any header interaction.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = sort;
        self
    }

    /// Sets the initial page size. Zero is clamped to 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Change notifications emitted by a [`CollectionView`].
///
/// Each signal fires after the pipeline has been recomputed, so a slot that
/// reads back through the view observes the new state. Selection changes are
/// reported by the selection model's own signal, reachable through
/// [`CollectionView::selection`].
pub struct ViewSignals {
    /// Emitted when the filter criterion changes. Args: the new query.
    pub filter_changed: Signal<FilterQuery>,

    /// Emitted when the sort state changes. Args: the new sort state.
    pub sort_changed: Signal<SortState>,

    /// Emitted when the current page index changes, whether by navigation
    /// or by clamping. Args: the new page state.
    pub page_changed: Signal<PageState>,

    /// Emitted when the page size changes. Args: the new page size.
    pub page_size_changed: Signal<usize>,
}

impl ViewSignals {
    fn new() -> Self {
        Self {
            filter_changed: Signal::new(),
            sort_changed: Signal::new(),
            page_changed: Signal::new(),
            page_size_changed: Signal::new(),
        }
    }
}

/// A point-in-time summary of the derived view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Number of items in the source collection.
    pub total_count: usize,
    /// Number of items surviving the filter.
    pub filtered_count: usize,
    /// Number of pages (at least 1).
    pub page_count: usize,
    /// Current 1-based page index.
    pub page_index: usize,
    /// Current page size.
    pub page_size: usize,
    /// Current sort state.
    pub sort: SortState,
    /// Selected keys, in selection order.
    pub selected_keys: Vec<RowKey>,
}

/// User-adjustable display preferences, serializable for persistence.
///
/// `None` fields mean "leave as is", so a partially populated value (for
/// example one deserialized from an older persisted format) applies cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreferences {
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Ids of the columns to show, in configuration order. Unknown ids are
    /// ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_columns: Option<Vec<String>>,
}

/// The orchestrating controller: owns all view state and recomputes the
/// pipeline on every event.
pub struct CollectionView<T: Record> {
    columns: Vec<Column<T>>,
    track_by: TrackBy<T>,
    filterable_fields: Vec<String>,

    items: Vec<T>,
    filter: FilterQuery,
    sort: SortState,
    page: PageState,
    selection: SelectionModel,

    /// Filtered-then-sorted source indices; the page is a slice of this.
    visible: Vec<usize>,

    signals: ViewSignals,
}

impl<T: Record> CollectionView<T> {
    /// Creates an empty view from a configuration.
    pub fn new(config: ViewConfig<T>) -> Self {
        Self {
            columns: config.columns,
            track_by: config.track_by,
            filterable_fields: config.filterable_fields,
            items: Vec::new(),
            filter: FilterQuery::default(),
            sort: config.default_sort,
            page: PageState::new(1, config.page_size),
            selection: SelectionModel::new(config.selection_mode),
            visible: Vec::new(),
            signals: ViewSignals::new(),
        }
    }

    /// Creates a view already populated with items.
    pub fn with_items(config: ViewConfig<T>, items: Vec<T>) -> Self {
        let mut view = Self::new(config);
        view.replace_items(items);
        view
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Replaces the source collection.
    ///
    /// The pipeline is recomputed and selected keys whose items are no
    /// longer present are dropped. The page index is kept where still valid,
    /// clamped otherwise.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild();

        let present: HashSet<RowKey> = self
            .items
            .iter()
            .map(|item| self.track_by.key_of(item))
            .collect();
        self.selection.retain(|key| present.contains(key));
    }

    /// Sets the filter criterion and resets to page 1.
    pub fn set_filter(&mut self, query: FilterQuery) {
        if query == self.filter {
            return;
        }
        self.filter = query;
        self.page.page_index = 1;
        self.rebuild();
        self.signals.filter_changed.emit(self.filter.clone());
    }

    /// Convenience for free-text filtering.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.set_filter(FilterQuery::FreeText(text.into()));
    }

    /// Sets the sort state. The page index is kept, clamped if needed.
    pub fn set_sort(&mut self, sort: SortState) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        self.rebuild();
        self.signals.sort_changed.emit(self.sort.clone());
    }

    /// Header-interaction convention: sorting by the already-active field
    /// flips the direction, sorting by a different field starts ascending.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        let descending = self.sort.field.as_deref() == Some(field.as_str()) && !self.sort.descending;
        self.set_sort(SortState::by(field, descending));
    }

    /// Navigates to a page. Out-of-range indices are clamped into
    /// `[1, page_count]`.
    pub fn set_page_index(&mut self, page_index: usize) {
        let count = self.page_count();
        let clamped = page_index.clamp(1, count);
        if clamped != page_index {
            tracing::debug!(
                requested = page_index,
                clamped,
                page_count = count,
                "page index out of range, clamped"
            );
        }
        if clamped != self.page.page_index {
            self.page.page_index = clamped;
            self.signals.page_changed.emit(self.page);
        }
    }

    /// Changes the page size and resets to page 1. Zero is clamped to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size == self.page.page_size {
            return;
        }
        let index_changed = self.page.page_index != 1;
        self.page.page_size = page_size;
        self.page.page_index = 1;
        self.signals.page_size_changed.emit(page_size);
        if index_changed {
            self.signals.page_changed.emit(self.page);
        }
    }

    /// Toggles selection of one item (the row's track key).
    pub fn toggle_selected(&mut self, item: &T) {
        self.toggle_selected_key(self.track_by.key_of(item));
    }

    /// Toggles selection of one row by key.
    pub fn toggle_selected_key(&mut self, key: RowKey) {
        self.selection.toggle(key);
    }

    /// Replaces the selection wholesale with an externally supplied key set.
    pub fn sync_selection(&mut self, keys: Vec<RowKey>) {
        self.selection.sync(keys);
    }

    /// Replaces the selection with the track keys of the given items.
    pub fn sync_selected_items(&mut self, items: &[T]) {
        let keys = items.iter().map(|item| self.track_by.key_of(item)).collect();
        self.selection.sync(keys);
    }

    /// Applies persisted display preferences. `None` fields leave the
    /// current value in place; unknown column ids are ignored.
    pub fn apply_preferences(&mut self, preferences: &ViewPreferences) {
        if let Some(page_size) = preferences.page_size {
            self.set_page_size(page_size);
        }
        if let Some(visible) = &preferences.visible_columns {
            for column in &mut self.columns {
                column.set_visible(visible.iter().any(|id| id == column.id()));
            }
        }
    }

    /// Returns the current state as persistable preferences.
    pub fn preferences(&self) -> ViewPreferences {
        ViewPreferences {
            page_size: Some(self.page.page_size),
            visible_columns: Some(
                self.columns
                    .iter()
                    .filter(|c| c.is_visible())
                    .map(|c| c.id().to_string())
                    .collect(),
            ),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns the change signals.
    pub fn signals(&self) -> &ViewSignals {
        &self.signals
    }

    /// Returns the selection model.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Returns all configured columns, visible or not.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Returns the currently visible columns, in configuration order.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns.iter().filter(|c| c.is_visible()).collect()
    }

    /// Returns the active filter criterion.
    pub fn filter(&self) -> &FilterQuery {
        &self.filter
    }

    /// Returns the active sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Returns the active page state.
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Number of items in the source collection.
    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Number of items surviving the filter.
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of pages for the current filtered count (at least 1).
    pub fn page_count(&self) -> usize {
        self.page.page_count(self.visible.len())
    }

    /// Returns the items on the current page, in view order.
    pub fn page_items(&self) -> Vec<&T> {
        let bounds = paginate::page_bounds(self.visible.len(), &self.page);
        self.visible[bounds].iter().map(|&i| &self.items[i]).collect()
    }

    /// Returns the selected items in source order, including rows currently
    /// filtered out of the view.
    pub fn selected_items(&self) -> Vec<&T> {
        if !self.selection.has_selection() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| self.selection.is_selected(&self.track_by.key_of(item)))
            .collect()
    }

    /// Returns a point-in-time summary of the derived view state.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            total_count: self.total_count(),
            filtered_count: self.filtered_count(),
            page_count: self.page_count(),
            page_index: self.page.page_index,
            page_size: self.page.page_size,
            sort: self.sort.clone(),
            selected_keys: self.selection.selected_keys().to_vec(),
        }
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    fn rebuild(&mut self) {
        self.visible = filter::apply(&self.items, &self.filter, &self.filterable_fields);
        sort::apply(&self.items, &mut self.visible, &self.sort);
        self.clamp_page();

        tracing::trace!(
            total = self.items.len(),
            filtered = self.visible.len(),
            page_index = self.page.page_index,
            "pipeline rebuilt"
        );
    }

    /// Clamps the page index into `[1, page_count]` after the filtered
    /// count changed underneath it.
    fn clamp_page(&mut self) {
        let count = self.page_count();
        let clamped = self.page.page_index.clamp(1, count);
        if clamped != self.page.page_index {
            tracing::debug!(
                from = self.page.page_index,
                to = clamped,
                page_count = count,
                "page index clamped after recompute"
            );
            self.page.page_index = clamped;
            self.signals.page_changed.emit(self.page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone)]
    struct Course {
        id: u32,
        title: &'static str,
        credits: i64,
        status: Option<&'static str>,
    }

    impl Record for Course {
        fn field(&self, name: &str) -> CellValue {
            match name {
                "id" => CellValue::from(self.id as i64),
                "title" => CellValue::from(self.title),
                "credits" => CellValue::from(self.credits),
                "status" => CellValue::from(self.status),
                _ => CellValue::None,
            }
        }
    }

    fn courses() -> Vec<Course> {
        vec![
            Course { id: 1, title: "Biology", credits: 4, status: Some("ACTIVE") },
            Course { id: 2, title: "Chemistry", credits: 3, status: Some("RETIRED") },
            Course { id: 3, title: "Physics", credits: 5, status: None },
            Course { id: 4, title: "Algebra", credits: 3, status: Some("ACTIVE") },
            Course { id: 5, title: "Geometry", credits: 2, status: Some("ACTIVE") },
        ]
    }

    fn config() -> ViewConfig<Course> {
        ViewConfig::new(
            vec![
                Column::new("title", "Title", |c: &Course| CellValue::from(c.title))
                    .with_sorting_field("title"),
                Column::new("credits", "Credits", |c: &Course| CellValue::from(c.credits))
                    .with_sorting_field("credits"),
                Column::new("status", "Status", |c: &Course| CellValue::from(c.status)),
            ],
            TrackBy::field("id"),
        )
        .with_selection_mode(SelectionMode::Multi)
        .with_filterable_fields(["title", "status"])
    }

    fn titles(view: &CollectionView<Course>) -> Vec<&'static str> {
        view.page_items().iter().map(|c| c.title).collect()
    }

    #[test]
    fn test_initial_state() {
        let view = CollectionView::with_items(config(), courses());
        assert_eq!(view.total_count(), 5);
        assert_eq!(view.filtered_count(), 5);
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.page_state().page_size, DEFAULT_PAGE_SIZE);
        // Unsorted: source order.
        assert_eq!(titles(&view), vec!["Biology", "Chemistry", "Physics", "Algebra", "Geometry"]);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut view = CollectionView::with_items(
            config().with_page_size(2),
            courses(),
        );
        view.set_page_index(3);
        assert_eq!(view.page_state().page_index, 3);

        view.set_filter_text("o");
        assert_eq!(view.page_state().page_index, 1);
        // Biology, Geometry match "o" in title.
        assert_eq!(view.filtered_count(), 2);
    }

    #[test]
    fn test_toggle_sort_convention() {
        let mut view = CollectionView::with_items(config(), courses());

        view.toggle_sort("title");
        assert_eq!(view.sort_state(), &SortState::by("title", false));
        assert_eq!(titles(&view)[0], "Algebra");

        // Same field flips the direction.
        view.toggle_sort("title");
        assert_eq!(view.sort_state(), &SortState::by("title", true));
        assert_eq!(titles(&view)[0], "Physics");

        // Different field starts ascending again.
        view.toggle_sort("credits");
        assert_eq!(view.sort_state(), &SortState::by("credits", false));
    }

    #[test]
    fn test_page_navigation_and_clamping() {
        let mut view = CollectionView::with_items(
            config().with_page_size(2),
            courses(),
        );
        assert_eq!(view.page_count(), 3);

        view.set_page_index(2);
        assert_eq!(titles(&view), vec!["Physics", "Algebra"]);

        // Beyond the end clamps to the last page.
        view.set_page_index(99);
        assert_eq!(view.page_state().page_index, 3);
        assert_eq!(titles(&view), vec!["Geometry"]);

        // Zero clamps to 1.
        view.set_page_index(0);
        assert_eq!(view.page_state().page_index, 1);
    }

    #[test]
    fn test_filter_shrink_clamps_page() {
        let mut view = CollectionView::with_items(
            config().with_page_size(2),
            courses(),
        );
        view.set_page_index(3);

        // Sorting doesn't change the filtered count, page index survives.
        view.toggle_sort("title");
        assert_eq!(view.page_state().page_index, 3);

        // Shrinking the page size keeps state valid through the reset.
        view.set_page_size(10);
        assert_eq!(view.page_state().page_index, 1);
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_selection_survives_filter_and_sort() {
        let mut view = CollectionView::with_items(config(), courses());
        let physics = courses().into_iter().find(|c| c.id == 3).unwrap();
        view.toggle_selected(&physics);

        view.set_filter_text("bio");
        assert_eq!(view.filtered_count(), 1);
        // Physics is filtered out of the page but stays selected.
        assert!(view.selection().is_selected(&RowKey::from("3")));
        assert_eq!(view.selected_items().len(), 1);

        view.set_filter_text("");
        view.toggle_sort("credits");
        assert!(view.selection().is_selected(&RowKey::from("3")));
    }

    #[test]
    fn test_replace_items_prunes_selection() {
        let mut view = CollectionView::with_items(config(), courses());
        view.toggle_selected_key(RowKey::from("2"));
        view.toggle_selected_key(RowKey::from("5"));

        // Drop Chemistry (id 2) from the data.
        let remaining: Vec<Course> = courses().into_iter().filter(|c| c.id != 2).collect();
        view.replace_items(remaining);

        assert!(!view.selection().is_selected(&RowKey::from("2")));
        assert!(view.selection().is_selected(&RowKey::from("5")));
    }

    #[test]
    fn test_sync_selection_is_one_way() {
        let mut view = CollectionView::with_items(config(), courses());
        view.toggle_selected_key(RowKey::from("1"));

        view.sync_selection(vec![RowKey::from("4"), RowKey::from("5")]);
        assert!(!view.selection().is_selected(&RowKey::from("1")));
        assert_eq!(view.selection().selected_count(), 2);
    }

    #[test]
    fn test_signals_fire_after_recompute() {
        let mut view = CollectionView::with_items(
            config().with_page_size(2),
            courses(),
        );
        let pages = Arc::new(Mutex::new(Vec::new()));

        let pages_clone = pages.clone();
        view.signals().page_changed.connect(move |state| {
            pages_clone.lock().push(state.page_index);
        });

        view.set_page_index(3);
        // Filtering resets to page 1 via the clamp path.
        view.set_filter_text("bio");

        assert_eq!(*pages.lock(), vec![3, 1]);
    }

    #[test]
    fn test_preferences_apply_and_roundtrip() {
        let mut view = CollectionView::with_items(config(), courses());

        view.apply_preferences(&ViewPreferences {
            page_size: Some(2),
            visible_columns: Some(vec!["title".into(), "bogus".into()]),
        });

        assert_eq!(view.page_state().page_size, 2);
        let visible: Vec<&str> = view.visible_columns().iter().map(|c| c.id()).collect();
        assert_eq!(visible, vec!["title"]);

        let json = serde_json::to_string(&view.preferences()).unwrap();
        let back: ViewPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page_size, Some(2));
        assert_eq!(back.visible_columns, Some(vec!["title".to_string()]));
    }

    #[test]
    fn test_snapshot() {
        let mut view = CollectionView::with_items(
            config().with_page_size(2),
            courses(),
        );
        view.set_filter_text("o");
        view.toggle_selected_key(RowKey::from("1"));

        let snap = view.snapshot();
        assert_eq!(snap.total_count, 5);
        assert_eq!(snap.filtered_count, 2);
        assert_eq!(snap.page_count, 1);
        assert_eq!(snap.page_index, 1);
        assert_eq!(snap.selected_keys, vec![RowKey::from("1")]);
    }

    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_page_clamp_is_logged() {
        let capture = LogCapture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut view = CollectionView::with_items(config().with_page_size(2), courses());
            view.set_page_index(99);
            assert_eq!(view.page_state().page_index, 3);
        });

        let output = String::from_utf8(capture.0.lock().clone()).unwrap();
        assert!(output.contains("clamped"), "missing clamp log: {output}");
    }

    #[test]
    fn test_empty_collection_is_total() {
        let mut view: CollectionView<Course> = CollectionView::new(config());
        assert_eq!(view.page_count(), 1);
        assert!(view.page_items().is_empty());

        view.set_filter_text("anything");
        view.toggle_sort("title");
        view.set_page_index(5);
        assert_eq!(view.page_state().page_index, 1);
        assert!(view.snapshot().selected_keys.is_empty());
    }
}
