//! Selection manager.
//!
//! [`SelectionModel`] tracks which rows are selected by track key, not by
//! position, so selection survives re-filtering, re-sorting and paging. A
//! row stays selected even while filtered off the current page, until it is
//! explicitly deselected or its item leaves the source collection.
//!
//! # Example
//!
//! ```
//! use horizon_dataview::{RowKey, SelectionMode, SelectionModel};
//!
//! let mut selection = SelectionModel::new(SelectionMode::Multi);
//!
//! selection.toggle(RowKey::from("course-1"));
//! assert!(selection.is_selected(&RowKey::from("course-1")));
//!
//! // Listen for changes
//! selection.selection_changed.connect(|keys| {
//!     println!("Selection is now {} rows", keys.len());
//! });
//! ```

use std::collections::HashSet;

use horizon_dataview_core::Signal;

use crate::record::RowKey;

/// Selection policy for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No rows can be selected; toggles are rejected.
    #[default]
    NoSelection,
    /// At most one row is selected at a time.
    Single,
    /// Any number of rows can be selected.
    Multi,
}

/// Tracks selected rows by key under a selection policy.
///
/// # Signals
///
/// - `selection_changed`: emitted with the full selected key set whenever
///   the selection actually changes.
pub struct SelectionModel {
    /// Selection policy.
    mode: SelectionMode,

    /// Set of selected keys for O(1) lookup.
    selected_set: HashSet<RowKey>,

    /// Selected keys in selection order.
    selected: Vec<RowKey>,

    /// Emitted when selection changes. Args: the new selected key set.
    pub selection_changed: Signal<Vec<RowKey>>,
}

impl SelectionModel {
    /// Creates a selection model with the given policy.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected_set: HashSet::new(),
            selected: Vec::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Returns the selection policy.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Checks if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected_set.contains(key)
    }

    /// Returns `true` if any rows are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the selected keys in selection order.
    pub fn selected_keys(&self) -> &[RowKey] {
        &self.selected
    }

    /// Toggles one row.
    ///
    /// - `Multi`: the key is added or removed.
    /// - `Single`: the selection becomes `{key}`, or empty if the key was
    ///   already the selection.
    /// - `NoSelection`: rejected (no-op).
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        let changed = match self.mode {
            SelectionMode::NoSelection => false,
            SelectionMode::Single => {
                if self.is_selected(&key) {
                    self.selected_set.clear();
                    self.selected.clear();
                } else {
                    self.selected_set.clear();
                    self.selected.clear();
                    self.selected_set.insert(key.clone());
                    self.selected.push(key);
                }
                true
            }
            SelectionMode::Multi => {
                if self.selected_set.remove(&key) {
                    self.selected.retain(|k| k != &key);
                } else {
                    self.selected_set.insert(key.clone());
                    self.selected.push(key);
                }
                true
            }
        };

        if changed {
            self.emit_changed();
        }
        changed
    }

    /// Replaces the selection wholesale with an externally supplied key set.
    ///
    /// This is the one-way sync point with a hosting caller: internal state
    /// never merges with the external value, it is overwritten by it.
    /// Duplicate keys are dropped; the policy is enforced (`Single` keeps
    /// the first key, `NoSelection` clears).
    pub fn sync(&mut self, keys: Vec<RowKey>) {
        let mut set = HashSet::new();
        let mut ordered = Vec::new();
        if self.mode != SelectionMode::NoSelection {
            for key in keys {
                if set.insert(key.clone()) {
                    ordered.push(key);
                }
                if self.mode == SelectionMode::Single && ordered.len() == 1 {
                    break;
                }
            }
        }

        if ordered != self.selected {
            self.selected_set = set;
            self.selected = ordered;
            self.emit_changed();
        }
    }

    /// Drops every selected key the predicate rejects.
    ///
    /// Called by the view controller when the source collection is replaced,
    /// so that rows removed from the data no longer count as selected.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: Fn(&RowKey) -> bool,
    {
        let before = self.selected.len();
        self.selected.retain(|key| keep(key));
        if self.selected.len() != before {
            self.selected_set = self.selected.iter().cloned().collect();
            self.emit_changed();
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected_set.clear();
        self.selected.clear();
        self.emit_changed();
    }

    fn emit_changed(&self) {
        self.selection_changed.emit(self.selected.clone());
    }
}
