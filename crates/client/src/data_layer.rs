//! List state shared by the list view and its controls.
//!
//! Every fetch starts a new generation and cancels the token of the one
//! before it. A superseded fetch commits nothing, so the state always
//! reflects the most recently started fetch that completed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use catalog_core::{CLIENT_PAGE_LIMIT, Item, Page, Pagination, leading_int, total_pages};
use serde_json::Value;

use crate::client::{CatalogClient, ListResponse, RawPagination};
use crate::error::ClientError;
use crate::token::FetchToken;

/// What a list view renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataState {
    pub items: Vec<Item>,
    pub pagination: Pagination,
    pub search_query: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Shared {
    view: DataState,
    generation: u64,
    in_flight: Option<FetchToken>,
}

#[derive(Debug)]
pub struct DataLayer {
    client: CatalogClient,
    shared: Mutex<Shared>,
}

impl DataLayer {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self { client, shared: Mutex::new(Shared::default()) }
    }

    #[must_use]
    pub fn snapshot(&self) -> DataState {
        self.lock().view.clone()
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.lock().view.pagination
    }

    #[must_use]
    pub fn search_query(&self) -> String {
        self.lock().view.search_query.clone()
    }

    /// Fetches `page` of the items matching `q` and commits it to the state.
    ///
    /// A caller-supplied `token` lets the caller abort this fetch; starting a
    /// newer fetch aborts it as well. Cancellation returns
    /// `ClientError::Cancelled` without touching `error`. Other failures set
    /// `error` and keep the previously loaded items.
    ///
    /// # Errors
    /// Whatever the request failed with, including `Cancelled`.
    pub async fn fetch(
        &self,
        page: usize,
        q: &str,
        token: Option<FetchToken>,
    ) -> Result<Page<Item>, ClientError> {
        let token = token.unwrap_or_default();
        let generation = self.begin(&token, q);
        let _loading = LoadingGuard { layer: self, generation };

        let result = tokio::select! {
            biased;
            () = token.cancelled() => Err(ClientError::Cancelled),
            response = self.client.list_items(q, page, CLIENT_PAGE_LIMIT) => response,
        };

        let mut shared = self.lock();
        if token.is_cancelled() {
            tracing::debug!(generation, page, "fetch superseded, discarding result");
            return Err(ClientError::Cancelled);
        }
        match result {
            Ok(response) => {
                let page = normalize_list(response, CLIENT_PAGE_LIMIT);
                shared.view.items.clone_from(&page.items);
                shared.view.pagination = page.pagination;
                Ok(page)
            },
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::warn!(generation, page, error = %e, "failed to fetch items");
                    shared.view.error = Some(e.to_string());
                }
                Err(e)
            },
        }
    }

    /// Moves to `page` keeping the current search query.
    ///
    /// # Errors
    /// `PageOutOfRange` without issuing a request when `page` is outside
    /// `[1, total_pages]`; otherwise as [`fetch`](Self::fetch).
    pub async fn change_page(&self, page: usize) -> Result<Page<Item>, ClientError> {
        let (pagination, q) = {
            let shared = self.lock();
            (shared.view.pagination, shared.view.search_query.clone())
        };
        if !pagination.contains_page(page) {
            return Err(ClientError::PageOutOfRange { page, total_pages: pagination.total_pages });
        }
        self.fetch(page, &q, None).await
    }

    /// Runs a new search from the first page.
    ///
    /// # Errors
    /// As [`fetch`](Self::fetch).
    pub async fn search(&self, q: &str) -> Result<Page<Item>, ClientError> {
        self.fetch(1, q, None).await
    }

    fn begin(&self, token: &FetchToken, q: &str) -> u64 {
        let mut shared = self.lock();
        shared.generation += 1;
        if let Some(previous) = shared.in_flight.replace(token.clone()) {
            previous.cancel();
        }
        shared.view.is_loading = true;
        shared.view.error = None;
        if shared.view.search_query != q {
            q.clone_into(&mut shared.view.search_query);
        }
        shared.generation
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `is_loading` when the fetch that set it finishes, however it ends.
struct LoadingGuard<'a> {
    layer: &'a DataLayer,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut shared = self.layer.lock();
        if shared.generation == self.generation {
            shared.view.is_loading = false;
            shared.in_flight = None;
        }
    }
}

/// Normalizes a list response into a consistent page.
///
/// A bare array becomes page 1 of itself. Envelope pagination fields are
/// coerced the lenient way: zero or unparsable values fall back to a
/// default, then `currentPage >= 1`, `itemsPerPage >= 1`, `totalItems >= 0`.
/// `totalPages` and the has-flags are always recomputed. `currentPage` is
/// taken as reported, not clamped to `totalPages`.
#[must_use]
pub fn normalize_list(response: ListResponse, default_per_page: usize) -> Page<Item> {
    match response {
        ListResponse::Bare(items) => {
            let pagination = descriptor(1, default_per_page.max(1), items.len());
            Page { items, pagination }
        },
        ListResponse::Envelope { items, pagination } => {
            let raw = pagination.unwrap_or_default();
            let RawPagination { current_page, items_per_page, total_items } = &raw;
            let current = coerce(current_page.as_ref(), 1, 1);
            let per_page = coerce(items_per_page.as_ref(), default_per_page, 1);
            let total = coerce(total_items.as_ref(), items.len(), 0);
            Page { pagination: descriptor(current, per_page, total), items }
        },
    }
}

fn descriptor(current_page: usize, items_per_page: usize, total_items: usize) -> Pagination {
    let total_pages = total_pages(total_items, items_per_page);
    Pagination {
        current_page,
        items_per_page,
        total_items,
        total_pages,
        has_next_page: current_page < total_pages,
        has_prev_page: current_page > 1,
    }
}

fn coerce(raw: Option<&Value>, fallback: usize, floor: usize) -> usize {
    match raw.and_then(leading_int).filter(|n| *n != 0) {
        Some(n) if n < 0 => floor,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX).max(floor),
        None => fallback.max(floor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ItemId;
    use serde_json::json;

    fn items(count: i64) -> Vec<Item> {
        (1..=count).map(|i| Item::new(ItemId::Int(i), &format!("item {i}"), "c", 1.0)).collect()
    }

    fn envelope(count: i64, pagination: Value) -> ListResponse {
        ListResponse::Envelope {
            items: items(count),
            pagination: Some(serde_json::from_value(pagination).expect("raw pagination")),
        }
    }

    #[test]
    fn bare_array_becomes_first_page() {
        let page = normalize_list(ListResponse::Bare(items(3)), 10);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.pagination, Pagination::new(1, 10, 3));
    }

    #[test]
    fn well_formed_envelope_is_kept() {
        let page = normalize_list(
            envelope(10, json!({"currentPage": 2, "itemsPerPage": 10, "totalItems": 25})),
            10,
        );
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn odd_fields_are_coerced() {
        let page = normalize_list(
            envelope(4, json!({"currentPage": "0", "itemsPerPage": -5, "totalItems": "12 items"})),
            10,
        );
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.items_per_page, 1);
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.total_pages, 12);
    }

    #[test]
    fn missing_pagination_falls_back_to_item_count() {
        let response = ListResponse::Envelope { items: items(7), pagination: None };
        let page = normalize_list(response, 10);
        assert_eq!(page.pagination, Pagination::new(1, 10, 7));

        let page = normalize_list(envelope(2, json!({"totalItems": 0})), 10);
        assert_eq!(page.pagination.total_items, 2);
    }
}
