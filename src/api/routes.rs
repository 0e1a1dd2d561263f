use axum::{Router, routing::get};
use std::sync::Arc;

use super::handlers;
use crate::state::AppState;

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(handlers::stats_handler))
}
