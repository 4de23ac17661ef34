//! HTTP response formatting
//!
//! Every payload leaves as pretty-printed JSON with a public cache lifetime
//! and a permissive cross-origin header, whatever it contains.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// `Cache-Control` values used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheControl {
    Public { max_age: u32 },
    NoStore,
}

impl CacheControl {
    pub fn public(max_age: u32) -> Self {
        Self::Public { max_age }
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public { max_age } => write!(f, "public, max-age={max_age}"),
            Self::NoStore => f.write_str("no-store"),
        }
    }
}

/// Serialize `payload` with the standard headers
pub fn json_with_cache<T: Serialize>(payload: &T, cache: CacheControl) -> Response {
    match serde_json::to_string_pretty(payload) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
                (header::CACHE_CONTROL, cache.to_string()),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize response payload: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
                    (header::CACHE_CONTROL, CacheControl::NoStore.to_string()),
                ],
                serde_json::json!({ "error": e.to_string() }).to_string(),
            )
                .into_response()
        }
    }
}
