//! Aggregate statistics over the item collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Derived metrics over the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
    pub last_updated: DateTime<Utc>,
    pub categories: BTreeMap<String, usize>,
}

impl StatsSnapshot {
    #[must_use]
    pub fn compute(items: &[Item], now: DateTime<Utc>) -> Self {
        let mut categories = BTreeMap::new();
        for item in items {
            *categories.entry(item.category.clone()).or_insert(0) += 1;
        }
        Self { total: items.len(), average_price: average_price(items), last_updated: now, categories }
    }
}

/// Stats as served over HTTP.
///
/// `cached` reports whether the cache was fresh when the request arrived,
/// not whether the values below were recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: StatsSnapshot,
    pub cached: bool,
}

/// Mean price rounded to cents, or 0 for an empty collection.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "item counts are far below 2^52")]
pub fn average_price(items: &[Item]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: f64 = items.iter().map(|i| i.price).sum();
    round_to_cents(sum / items.len() as f64)
}

/// Rounds half away from zero to two decimal places.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
