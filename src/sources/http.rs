//! HTTP page fetcher backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::PageFetcher;
use crate::config::SourceConfig;
use crate::errors::{AppResult, SourceError, SourceResult};

/// Fetches pages over HTTP with a fixed client identifier and timeout
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &SourceConfig) -> AppResult<Self> {
        Self::new(&config.user_agent, config.request_timeout()?)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching page content from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::timeout(url)
            } else {
                SourceError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        debug!("Fetched {} bytes of page content from {}", content.len(), url);
        Ok(content)
    }
}
