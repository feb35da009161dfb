pub mod extractors;
pub mod invite;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use serde::Serialize;

use crate::config::CONFIG;
use crate::error::AppError;
use crate::middleware::cors_headers;
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Create the API router shared by the server and function bindings
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/version", get(get_version))
        .method_not_allowed_fallback(not_found)
        .nest("/api/invite", invite::invite_routes(state))
        .fallback(not_found)
        .layer(axum_middleware::from_fn(cors_headers))
}

/// Unmatched route or method
pub async fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionInfo {
    version: String,
    commit_hash: String,
    build_time: String,
}

/// Version info endpoint
async fn get_version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: CONFIG.version.clone(),
        commit_hash: CONFIG.commit_hash.clone(),
        build_time: CONFIG.build_time.clone(),
    })
}
