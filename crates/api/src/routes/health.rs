//! Health check and welcome endpoints.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Financial Agent API!"
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "finagent-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
