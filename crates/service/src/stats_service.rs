//! Catalog statistics behind a time-based cache.
//!
//! The cache entry is refreshed when it is older than the TTL *and* the
//! change signal (collection length) differs from the stored one. The
//! `cached` flag on a report reflects freshness at request time, so a stale
//! request whose signal did not change is served the old snapshot with
//! `cached: false` and the old `lastUpdated`.

use std::sync::Arc;

use catalog_core::{Item, STATS_CACHE_TTL_SECS, StatsReport, StatsSnapshot};
use catalog_storage::ItemStore;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::ServiceError;

/// Freshness of the cache entry relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Age is within the TTL.
    Fresh,
    /// Age exceeds the TTL, or nothing has been computed yet.
    Stale,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    stats: StatsSnapshot,
    last_updated: DateTime<Utc>,
    items_hash: usize,
}

impl CacheEntry {
    fn state(&self, now: DateTime<Utc>, ttl: Duration) -> CacheState {
        if now.signed_duration_since(self.last_updated) > ttl {
            CacheState::Stale
        } else {
            CacheState::Fresh
        }
    }

    fn report(&self, cached: bool) -> StatsReport {
        let stats = StatsSnapshot { last_updated: self.last_updated, ..self.stats.clone() };
        StatsReport { stats, cached }
    }
}

pub struct StatsService {
    store: Arc<dyn ItemStore>,
    ttl: Duration,
    cache: Mutex<Option<CacheEntry>>,
}

impl StatsService {
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self::with_ttl(store, std::time::Duration::from_secs(STATS_CACHE_TTL_SECS))
    }

    #[must_use]
    pub fn with_ttl(store: Arc<dyn ItemStore>, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365));
        Self { store, ttl, cache: Mutex::new(None) }
    }

    pub async fn stats(&self) -> Result<StatsReport, ServiceError> {
        self.stats_at(Utc::now()).await
    }

    /// Serves stats as of `now`.
    ///
    /// The cache lock is held across recomputation, so concurrent stale
    /// requests compute the snapshot once.
    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<StatsReport, ServiceError> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) =
            cache.as_ref().filter(|e| e.state(now, self.ttl) == CacheState::Fresh)
        {
            tracing::debug!(last_updated = %entry.last_updated, "stats served from cache");
            return Ok(entry.report(true));
        }

        let items = self.store.load_all().await?;
        let signal = change_signal(&items);

        if let Some(entry) = cache.as_ref().filter(|e| e.items_hash == signal) {
            tracing::debug!(signal, "stats cache stale but item count unchanged, keeping snapshot");
            return Ok(entry.report(false));
        }

        let entry = CacheEntry {
            stats: StatsSnapshot::compute(&items, now),
            last_updated: now,
            items_hash: signal,
        };
        tracing::debug!(signal, total = entry.stats.total, "stats cache refreshed");
        let report = entry.report(false);
        *cache = Some(entry);
        Ok(report)
    }

    /// Current cache freshness, for diagnostics.
    pub async fn cache_state(&self, now: DateTime<Utc>) -> CacheState {
        self.cache
            .lock()
            .await
            .as_ref()
            .map_or(CacheState::Stale, |entry| entry.state(now, self.ttl))
    }
}

/// Cheap fingerprint of the collection: its length.
///
/// Edits that keep the count the same are not detected.
#[must_use]
pub fn change_signal(items: &[Item]) -> usize {
    items.len()
}
