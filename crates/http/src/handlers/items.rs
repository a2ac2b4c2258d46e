use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use catalog_core::{Item, Page};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::ItemsQuery;

pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Page<Item>>, ApiError> {
    let page = state.item_service.list(&query.to_list_query()).await?;
    Ok(Json(page))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let item = state.item_service.get(&id).await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.item_service.create(body).await?;
    tracing::info!(id = %item.id, name = %item.name, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}
