//! HTTP API server for the catalog.

#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalog_service::{ItemService, StatsService};
use catalog_storage::ItemStore;

pub use query_types::ItemsQuery;
pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Search, lookup and creation of items
    pub item_service: Arc<ItemService>,
    /// Cached aggregate statistics
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    /// Wires both services to the same store.
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>, stats_ttl: std::time::Duration) -> Self {
        Self {
            item_service: Arc::new(ItemService::new(Arc::clone(&store))),
            stats_service: Arc::new(StatsService::with_ttl(store, stats_ttl)),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/items", get(handlers::items::list_items).post(handlers::items::create_item))
        .route("/api/items/{id}", get(handlers::items::get_item))
        .route("/api/stats", get(handlers::stats::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process exits.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting HTTP server on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
