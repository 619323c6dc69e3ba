//! Pagination policy for the product grid.
//!
//! Pages are numbered from 1. Everything here is a pure function of the item
//! count, the page size and the current page; out-of-range pages produce empty
//! slices rather than errors.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

/// Products shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Number of pages needed for `item_count` items. Zero items means zero pages.
#[must_use]
pub const fn total_pages(item_count: usize, page_size: NonZeroUsize) -> usize {
    item_count.div_ceil(page_size.get())
}

/// Index range of the items on `page`, clamped to `item_count`.
///
/// Page `0` and pages past the end yield an empty range.
#[must_use]
pub fn page_range(item_count: usize, page_size: NonZeroUsize, page: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let size = page_size.get();
    let start = (page - 1).saturating_mul(size).min(item_count);
    let end = page.saturating_mul(size).min(item_count);
    start..end
}

/// Returns true if `page` can be navigated to.
#[must_use]
pub const fn is_valid_page(page: usize, total_pages: usize) -> bool {
    page >= 1 && page <= total_pages
}

/// A numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

/// Everything the view needs to draw the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageButton>,
}

impl PaginationControls {
    /// Lay out the controls for the given state.
    #[must_use]
    pub fn new(item_count: usize, page_size: NonZeroUsize, current_page: usize) -> Self {
        let total_pages = total_pages(item_count, page_size);
        let pages = (1..=total_pages)
            .map(|number| PageButton {
                number,
                active: number == current_page,
            })
            .collect();

        Self {
            current_page,
            total_pages,
            previous_enabled: current_page > 1,
            next_enabled: total_pages > 0 && current_page < total_pages,
            pages,
        }
    }
}
