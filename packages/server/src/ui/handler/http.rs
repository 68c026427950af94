//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing the registered session keys (sorted)
pub async fn debug_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let keys = state.list_sessions_usecase.execute().await;
    Json(keys.iter().map(ToString::to_string).collect())
}
