//! Health check handler

use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::web::{
    responses::{json_with_cache, CacheControl},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub channels: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Liveness only; upstream pages are not fetched here
pub async fn health_check(State(state): State<AppState>) -> Response {
    json_with_cache(
        &HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            channels: state.service.registry().len(),
            timestamp: chrono::Utc::now(),
        },
        CacheControl::public(state.config.cache.status_max_age_secs),
    )
}
