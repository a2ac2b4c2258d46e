use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use catalog_core::{STATS_CACHE_TTL_SECS, env_parse_with_default};
use catalog_http::AppState;
use catalog_storage::JsonFileStore;

pub(crate) async fn run(port: u16, host: &str, data: PathBuf) -> Result<()> {
    let ttl_secs = env_parse_with_default("CATALOG_STATS_TTL_SECS", STATS_CACHE_TTL_SECS);
    tracing::info!(data = %data.display(), ttl_secs, "opening collection");

    let store = Arc::new(JsonFileStore::new(data));
    let state = Arc::new(AppState::new(store, Duration::from_secs(ttl_secs)));

    catalog_http::serve(&format!("{host}:{port}"), state).await
}
