//! Request/query types (Deserialize)

use catalog_core::{DEFAULT_PAGE_LIMIT, parse_int_prefix};
use catalog_service::ListQuery;
use serde::Deserialize;

/// `GET /api/items` query string.
///
/// Numbers arrive as raw strings and are read by their integer prefix, so
/// `page=2abc` means page 2, `limit=5.9` means 5, and `page=abc` falls back
/// to the default instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ItemsQuery {
    pub fn to_list_query(&self) -> ListQuery {
        ListQuery::new(
            self.q.clone(),
            parse_int_param(self.page.as_deref(), 1),
            parse_int_param(self.limit.as_deref(), DEFAULT_PAGE_LIMIT as i64),
        )
    }
}

fn parse_int_param(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_int_prefix).unwrap_or(default)
}
