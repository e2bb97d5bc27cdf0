//! Pagination stage.
//!
//! Slices the sorted index mapping into the requested page. This stage is a
//! pure slicer: it does not clamp an out-of-range page index. Clamping is
//! view-controller policy, applied before the slice (see
//! [`crate::view::CollectionView`]).

use std::ops::Range;

/// Page size used when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The pagination slice of view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page index.
    pub page_index: usize,
    /// Items per page; treated as at least 1 everywhere it is consumed.
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Creates a page state. A zero page size is clamped to 1.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages for the given filtered count.
    ///
    /// At least 1 even for an empty collection, so a pager always has a
    /// current page to point at. The fields are public, so a zero page size
    /// is guarded here again rather than dividing by it.
    pub fn page_count(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.page_size.max(1)).max(1)
    }
}

/// Returns the half-open range of mapping positions on the requested page.
///
/// A page beyond the end yields an empty range rather than panicking; the
/// controller normally clamps before this is reachable.
pub fn page_bounds(len: usize, state: &PageState) -> Range<usize> {
    let page_size = state.page_size.max(1);
    let start = state
        .page_index
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let state = PageState::new(1, 10);
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(9), 1);
        assert_eq!(state.page_count(10), 1);
        assert_eq!(state.page_count(11), 2);
        assert_eq!(state.page_count(25), 3);
    }

    #[test]
    fn test_full_and_partial_pages() {
        // 25 items at page size 10: pages of 10, 10 and 5.
        assert_eq!(page_bounds(25, &PageState::new(1, 10)), 0..10);
        assert_eq!(page_bounds(25, &PageState::new(2, 10)), 10..20);
        assert_eq!(page_bounds(25, &PageState::new(3, 10)), 20..25);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let bounds = page_bounds(5, &PageState::new(3, 10));
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let bounds = page_bounds(0, &PageState::new(1, 10));
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let state = PageState::new(1, 0);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.page_count(5), 5);

        // The fields are public; a hand-built zero size must still be total.
        let raw = PageState {
            page_index: 1,
            page_size: 0,
        };
        assert_eq!(raw.page_count(5), 5);
        assert_eq!(page_bounds(5, &raw), 0..1);
    }
}
