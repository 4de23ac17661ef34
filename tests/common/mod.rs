#![allow(dead_code)]

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc, time::Duration};

use nowplaying::{
    config::Config,
    errors::{SourceError, SourceResult},
    registry::ChannelRegistry,
    services::NowPlayingService,
    sources::PageFetcher,
    web::{create_router, AppState},
};

pub const BASE_URL: &str = "https://radio.test";
pub const SCHEDULE_URL: &str = "https://radio.test/schedule/";

/// Serves canned pages by URL; anything else is a transport failure
#[derive(Default)]
pub struct StaticPageFetcher {
    pages: HashMap<String, String>,
    slow: HashMap<String, Duration>,
}

impl StaticPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Serve `body` for `url` only after `delay`
    pub fn with_slow_page(mut self, url: &str, body: &str, delay: Duration) -> Self {
        self.slow.insert(url.to_string(), delay);
        self.with_page(url, body)
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        if let Some(delay) = self.slow.get(url).copied() {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::transport(url, "connection refused"))
    }
}

pub fn channel_url(id: &str) -> String {
    format!("{BASE_URL}/{id}/")
}

/// Default four-station config pointed at the test host
pub fn test_config() -> Config {
    let toml = format!(
        r#"
[source]
base_url = "{BASE_URL}"

[[channels]]
id = "clubzone"
name = "ClubZone"
url = "{BASE_URL}/clubzone/"

[[channels]]
id = "hypnotica"
name = "Hypnotica"
url = "{BASE_URL}/hypnotica/"

[[channels]]
id = "powerbase"
name = "PowerBase"
url = "{BASE_URL}/powerbase/"

[[channels]]
id = "thegrind"
name = "TheGrind"
url = "{BASE_URL}/thegrind/"
"#
    );
    let config = Config::from_toml_str(&toml).unwrap();
    config.validate().unwrap();
    config
}

pub fn service_with(config: &Config, fetcher: StaticPageFetcher) -> NowPlayingService {
    let registry = ChannelRegistry::from_config(&config.channels);
    NowPlayingService::from_config(config, Arc::new(fetcher), registry).unwrap()
}

pub fn router_with(fetcher: StaticPageFetcher) -> axum::Router {
    let config = test_config();
    let service = service_with(&config, fetcher);
    create_router(AppState::new(config, service).unwrap())
}

pub fn live_page(dj: &str, slug: &str, show: &str, banner: u32) -> String {
    format!(
        r#"<html><body>
        <img src="/image/dj_banner/{banner}.jpg">
        <span class="badge">LIVE</span>
        <a href="/djs/{slug}/">{dj}</a>
        <div class="show">{show} (2025-08-08)</div>
        </body></html>"#
    )
}
