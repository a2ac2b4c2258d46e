//! Page window arithmetic shared by the server and the client.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_LIMIT;

/// Metadata describing one page over a larger result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Builds a descriptor, clamping `requested_page` into `[1, total_pages]`.
    ///
    /// `items_per_page` of zero is treated as one.
    #[must_use]
    pub fn new(requested_page: usize, items_per_page: usize, total_items: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        let total_pages = total_pages(total_items, items_per_page);
        let current_page = requested_page.clamp(1, total_pages);
        Self {
            current_page,
            items_per_page,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Index range of the current page within the full result set.
    #[must_use]
    pub fn window(&self) -> Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.items_per_page);
        let start = start.min(self.total_items);
        let end = start.saturating_add(self.items_per_page).min(self.total_items);
        start..end
    }

    /// Whether `page` can be requested without leaving the result set.
    #[must_use]
    pub const fn contains_page(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT, 0)
    }
}

/// `max(1, ceil(total_items / items_per_page))`
#[must_use]
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1)).max(1)
}

/// One page of results together with its descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Clone> Page<T> {
    /// Cuts the requested page out of `all`.
    #[must_use]
    pub fn slice(all: &[T], requested_page: usize, items_per_page: usize) -> Self {
        let pagination = Pagination::new(requested_page, items_per_page, all.len());
        let items = all.get(pagination.window()).map(<[T]>::to_vec).unwrap_or_default();
        Self { items, pagination }
    }
}
