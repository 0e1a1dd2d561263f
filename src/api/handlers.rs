use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use super::types::ApiResult;
use crate::{models::stats::HubStats, state::AppState};

pub async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<HubStats> {
    ApiResult::ok(state.hub.lock().await.stats())
}

pub async fn not_found() -> ApiResult<()> {
    ApiResult::error(StatusCode::NOT_FOUND, "NOT_FOUND")
}
