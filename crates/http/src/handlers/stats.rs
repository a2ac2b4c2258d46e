use axum::{Json, extract::State};
use std::sync::Arc;

use catalog_core::StatsReport;

use crate::AppState;
use crate::api_error::ApiError;

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsReport>, ApiError> {
    let report = state.stats_service.stats().await?;
    Ok(Json(report))
}
