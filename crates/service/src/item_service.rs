use std::sync::Arc;

use catalog_core::{DEFAULT_PAGE_LIMIT, Item, MAX_PAGE_LIMIT, NewItem, Page};
use catalog_storage::ItemStore;
use chrono::Utc;
use serde_json::Value;

use crate::ServiceError;

/// A normalized list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl ListQuery {
    /// Clamps `page` to at least 1 and `limit` into `[1, MAX_PAGE_LIMIT]`.
    ///
    /// An empty search string means no filter.
    #[must_use]
    pub fn new(q: Option<String>, page: i64, limit: i64) -> Self {
        let page = usize::try_from(page.max(1)).unwrap_or(1);
        let max = i64::try_from(MAX_PAGE_LIMIT).unwrap_or(i64::MAX);
        let limit = usize::try_from(limit.clamp(1, max)).unwrap_or(DEFAULT_PAGE_LIMIT);
        Self { q: q.filter(|q| !q.is_empty()), page, limit }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { q: None, page: 1, limit: DEFAULT_PAGE_LIMIT }
    }
}

pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Searches by name and returns the requested page of matches.
    ///
    /// The page descriptor is computed over the filtered set and the page
    /// number is clamped into range.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Item>, ServiceError> {
        let items = self.store.load_all().await?;
        let matches = match query.q.as_deref() {
            Some(q) => filter_by_name(items, q),
            None => items,
        };
        Ok(Page::slice(&matches, query.page, query.limit))
    }

    pub async fn get(&self, id: &str) -> Result<Item, ServiceError> {
        let items = self.store.load_all().await?;
        find_by_id(&items, id).cloned().ok_or_else(|| ServiceError::NotFound { id: id.to_owned() })
    }

    /// Validates `body` and appends it as a new item.
    ///
    /// Returns after the collection has been written.
    pub async fn create(&self, body: Value) -> Result<Item, ServiceError> {
        let new = NewItem::from_json(body)?;
        let item = self.store.insert(new, Utc::now()).await?;
        Ok(item)
    }
}

/// Keeps items whose name contains `q`, ignoring case.
#[must_use]
pub fn filter_by_name(items: Vec<Item>, q: &str) -> Vec<Item> {
    let needle = q.to_lowercase();
    items.into_iter().filter(|item| item.name_contains(&needle)).collect()
}

/// Looks an item up by its textual id.
///
/// Two passes in fixed order: first an exact match against string ids, then
/// a match of the strictly parsed integer against numeric ids. Within a pass
/// the first item in file order wins.
///
/// The integer parse is strict on purpose, unlike the prefix coercion used
/// for `page` and `limit`: `"3abc"` matches no numeric id.
#[must_use]
pub fn find_by_id<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find(|item| item.id.as_str() == Some(id)).or_else(|| {
        let numeric = id.parse::<i64>().ok()?;
        items.iter().find(|item| item.id.as_int() == Some(numeric))
    })
}
