//! Sorting stage.
//!
//! Orders the filtered index mapping by zero or one active sort field. The
//! sort is stable (ties keep their source-relative order) and never mutates
//! or clones the items themselves.
//!
//! # Null placement
//!
//! Null values group *first* under either direction: the descending flag
//! reverses only the defined-vs-defined comparison, not the null placement
//! rule. Moving nulls last under descending sort would be a product-level
//! behavior change; the rule is isolated in `ordering_for` and covered by
//! `test_nulls_first_even_when_descending`.

use std::cmp::Ordering;

use crate::record::Record;
use crate::value::{CellValue, compare_values};

/// The sort slice of view state: at most one active field plus direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// The field ordered by; `None` preserves input order.
    pub field: Option<String>,
    /// Whether defined values are ordered descending.
    pub descending: bool,
}

impl SortState {
    /// Creates a sort on the given field.
    pub fn by(field: impl Into<String>, descending: bool) -> Self {
        Self {
            field: Some(field.into()),
            descending,
        }
    }

    /// Creates the unsorted state (input order preserved).
    pub fn unsorted() -> Self {
        Self::default()
    }
}

/// Reorders the index mapping in place according to the sort state.
///
/// A `None` field is a no-op, leaving the mapping in source order. Unknown
/// fields yield `CellValue::None` per the [`Record`] contract and therefore
/// group first like any null.
pub fn apply<T: Record>(items: &[T], mapping: &mut [usize], state: &SortState) {
    let Some(field) = state.field.as_deref() else {
        return;
    };
    let descending = state.descending;
    mapping.sort_by(|&a, &b| {
        ordering_for(&items[a].field(field), &items[b].field(field), descending)
    });
}

/// The full ordering rule: nulls first regardless of direction, descending
/// reverses only the defined-vs-defined comparison.
pub(crate) fn ordering_for(a: &CellValue, b: &CellValue, descending: bool) -> Ordering {
    match (a.is_none(), b.is_none()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let ord = compare_values(a, b);
            if descending { ord.reverse() } else { ord }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        rank: Option<i64>,
    }

    impl Record for Row {
        fn field(&self, name: &str) -> CellValue {
            match name {
                "name" => CellValue::from(self.name),
                "rank" => CellValue::from(self.rank),
                _ => CellValue::None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "charlie",
                rank: Some(2),
            },
            Row {
                name: "alice",
                rank: None,
            },
            Row {
                name: "bob",
                rank: Some(1),
            },
            Row {
                name: "dave",
                rank: Some(2),
            },
        ]
    }

    fn names(items: &[Row], mapping: &[usize]) -> Vec<&'static str> {
        mapping.iter().map(|&i| items[i].name).collect()
    }

    #[test]
    fn test_no_field_preserves_order() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::unsorted());
        assert_eq!(mapping, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_ascending() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::by("name", false));
        assert_eq!(names(&items, &mapping), vec!["alice", "bob", "charlie", "dave"]);
    }

    #[test]
    fn test_descending() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::by("name", true));
        assert_eq!(names(&items, &mapping), vec!["dave", "charlie", "bob", "alice"]);
    }

    #[test]
    fn test_stability_on_ties() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::by("rank", false));
        // alice (null) first, then bob(1), then the rank-2 tie keeps source
        // order: charlie before dave.
        assert_eq!(names(&items, &mapping), vec!["alice", "bob", "charlie", "dave"]);
    }

    #[test]
    fn test_nulls_first_even_when_descending() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::by("rank", true));
        // Nulls still group first; defined values are reversed.
        assert_eq!(names(&items, &mapping), vec!["alice", "charlie", "dave", "bob"]);
    }

    #[test]
    fn test_unknown_field_groups_everything() {
        let items = rows();
        let mut mapping = vec![0, 1, 2, 3];
        apply(&items, &mut mapping, &SortState::by("missing", false));
        // All values are null, all ties: source order preserved.
        assert_eq!(mapping, vec![0, 1, 2, 3]);
    }
}
