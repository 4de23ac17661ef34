//! Now-playing endpoint
//!
//! `GET /api/nowplaying` reports channel statuses; `?type=schedule` switches
//! to the aggregated upcoming-show list.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::debug;

use crate::web::{
    responses::{json_with_cache, CacheControl},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct NowPlayingQuery {
    #[serde(rename = "type")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NowPlayingMode {
    Status,
    Schedule,
}

impl NowPlayingMode {
    /// Unknown or missing values select status mode
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("schedule") => Self::Schedule,
            _ => Self::Status,
        }
    }
}

pub async fn now_playing(
    State(state): State<AppState>,
    Query(query): Query<NowPlayingQuery>,
) -> Response {
    let mode = NowPlayingMode::from_param(query.mode.as_deref());
    debug!("Now-playing request in {:?} mode", mode);

    match mode {
        NowPlayingMode::Status => {
            let statuses = state
                .service
                .get_statuses_within(state.aggregation_timeout)
                .await;
            json_with_cache(
                &statuses,
                CacheControl::public(state.config.cache.status_max_age_secs),
            )
        }
        NowPlayingMode::Schedule => {
            let schedule = state
                .service
                .get_schedule_within(state.aggregation_timeout)
                .await;
            json_with_cache(
                &schedule,
                CacheControl::public(state.config.cache.schedule_max_age_secs),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_param() {
        assert_eq!(NowPlayingMode::from_param(None), NowPlayingMode::Status);
        assert_eq!(
            NowPlayingMode::from_param(Some("schedule")),
            NowPlayingMode::Schedule
        );
        assert_eq!(
            NowPlayingMode::from_param(Some("Schedule")),
            NowPlayingMode::Schedule
        );
        assert_eq!(NowPlayingMode::from_param(Some("status")), NowPlayingMode::Status);
        assert_eq!(NowPlayingMode::from_param(Some("bogus")), NowPlayingMode::Status);
    }
}
