//! Plain-text rendering of list and detail state.

use std::fmt::Write as _;
use std::ops::Range;

use catalog_core::{Item, LIST_OVERSCAN, LIST_ROW_HEIGHT, Pagination};

use crate::data_layer::DataState;

pub const NO_ITEMS: &str = "No items found";
pub const LOADING: &str = "Loading items...";

/// One list row: name, price with two decimals, category.
#[must_use]
pub fn render_row(item: &Item) -> String {
    format!("{}  ${:.2}  {}", item.name, item.price, category_label(item))
}

/// Pagination footer, or `None` when there is nothing to page through.
#[must_use]
pub fn render_pagination(pagination: &Pagination) -> Option<String> {
    if pagination.total_pages <= 1 && pagination.total_items == 0 {
        return None;
    }
    let mut parts = Vec::with_capacity(3);
    if pagination.has_prev_page {
        parts.push("< Previous".to_owned());
    }
    parts.push(format!(
        "Page {} of {} (Total: {} items)",
        pagination.current_page, pagination.total_pages, pagination.total_items
    ));
    if pagination.has_next_page {
        parts.push("Next >".to_owned());
    }
    Some(parts.join("  "))
}

/// Whole list view for the current data-layer state.
#[must_use]
pub fn render_list(state: &DataState) -> String {
    if state.is_loading && state.items.is_empty() {
        return LOADING.to_owned();
    }
    if let Some(error) = &state.error {
        return format!("Error: {error}");
    }

    let mut out = String::new();
    if state.items.is_empty() {
        out.push_str(NO_ITEMS);
    } else {
        for item in &state.items {
            let _ = writeln!(out, "[{}] {}", item.id, render_row(item));
        }
        out.truncate(out.trim_end().len());
    }
    if let Some(footer) = render_pagination(&state.pagination) {
        let _ = write!(out, "\n\n{footer}");
    }
    out
}

/// Detail view of a single item, including fields the catalog does not model.
#[must_use]
pub fn render_detail(item: &Item) -> String {
    let mut out = format!(
        "{}\nCategory: {}\nPrice: ${:.2}\nId: {}",
        item.name,
        category_label(item),
        item.price,
        item.id
    );
    for (key, value) in &item.extra {
        let _ = write!(out, "\n{key}: {value}");
    }
    out
}

fn category_label(item: &Item) -> &str {
    if item.category.is_empty() { "No category" } else { &item.category }
}

/// Fixed-height row windowing for long lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    pub item_size: usize,
    pub overscan: usize,
}

impl Default for VirtualWindow {
    fn default() -> Self {
        Self { item_size: LIST_ROW_HEIGHT, overscan: LIST_OVERSCAN }
    }
}

impl VirtualWindow {
    /// Indices of rows to render for a viewport of `height` scrolled by
    /// `offset`, widened by `overscan` rows on both sides.
    #[must_use]
    pub fn visible_range(&self, item_count: usize, height: usize, offset: usize) -> Range<usize> {
        if item_count == 0 {
            return 0..0;
        }
        let size = self.item_size.max(1);
        let first = (offset / size).min(item_count - 1);
        let last = offset.saturating_add(height).div_ceil(size).max(first + 1);
        first.saturating_sub(self.overscan)..last.saturating_add(self.overscan).min(item_count)
    }
}
