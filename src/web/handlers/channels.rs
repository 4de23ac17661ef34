//! Channel registry endpoint

use axum::{extract::State, response::Response};

use crate::web::{
    responses::{json_with_cache, CacheControl},
    AppState,
};

/// The registered channels, in registry order
pub async fn list_channels(State(state): State<AppState>) -> Response {
    json_with_cache(
        &state.service.registry().channels(),
        CacheControl::public(state.config.cache.schedule_max_age_secs),
    )
}
