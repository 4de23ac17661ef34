//! Aggregation across channel pages
//!
//! Status mode fans out one fetch per channel and joins them all; schedule
//! mode walks the channels in order and then the site-wide schedule page,
//! feeding a single de-duplicating accumulator. Failures of individual
//! sources are turned into data here and never reach the caller.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::accumulator::ScheduleAccumulator;
use crate::config::{Config, ScheduleConfig};
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::extractors::{ScheduleExtractor, StatusExtractor};
use crate::models::{AggregatedSchedule, Channel, ChannelStatus, ScheduleEntry};
use crate::registry::ChannelRegistry;
use crate::sources::PageFetcher;

/// Placeholder in `schedule.channel_heading` replaced by the channel name
pub const CHANNEL_PLACEHOLDER: &str = "{channel}";

#[derive(Clone)]
pub struct NowPlayingService {
    fetcher: Arc<dyn PageFetcher>,
    registry: ChannelRegistry,
    status_extractor: StatusExtractor,
    schedule_extractor: ScheduleExtractor,
    channel_heading: String,
    site_heading: String,
    schedule_url: String,
}

impl NowPlayingService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        registry: ChannelRegistry,
        status_extractor: StatusExtractor,
        schedule: &ScheduleConfig,
        schedule_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            registry,
            status_extractor,
            schedule_extractor: ScheduleExtractor::new(schedule.boundary_markers.clone()),
            channel_heading: schedule.channel_heading.clone(),
            site_heading: schedule.site_heading.clone(),
            schedule_url: schedule_url.into(),
        }
    }

    /// Wire the service from a validated configuration
    pub fn from_config(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        registry: ChannelRegistry,
    ) -> AppResult<Self> {
        let base_url = url::Url::parse(&config.source.base_url).map_err(|e| {
            AppError::configuration(format!("source.base_url '{}': {e}", config.source.base_url))
        })?;
        let schedule_url = config.source.schedule_url()?;

        Ok(Self::new(
            fetcher,
            registry,
            StatusExtractor::new(base_url),
            &config.schedule,
            schedule_url,
        ))
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// One status per registered channel, in registry order
    pub async fn get_statuses(&self) -> Vec<ChannelStatus> {
        self.collect_statuses(None).await
    }

    /// Like [`get_statuses`](Self::get_statuses) but every fetch shares one
    /// deadline; a channel still loading when it passes reports a timeout
    pub async fn get_statuses_within(&self, limit: Duration) -> Vec<ChannelStatus> {
        self.collect_statuses(Some(Instant::now() + limit)).await
    }

    async fn collect_statuses(&self, deadline: Option<Instant>) -> Vec<ChannelStatus> {
        let statuses = join_all(
            self.registry
                .channels()
                .iter()
                .map(|channel| self.channel_status(channel, deadline)),
        )
        .await;

        let failed = statuses.iter().filter(|s| s.is_error()).count();
        let live = statuses.iter().filter(|s| s.is_live).count();
        info!(
            "Collected {} channel statuses ({} live, {} failed)",
            statuses.len(),
            live,
            failed
        );
        statuses
    }

    async fn channel_status(
        &self,
        channel: &Channel,
        deadline: Option<Instant>,
    ) -> ChannelStatus {
        match self.fetch_before(&channel.source_url, deadline).await {
            Ok(page) => self.status_extractor.extract(channel, &page),
            Err(e) => {
                warn!("Failed to fetch status page for '{}': {}", channel.id, e);
                ChannelStatus::failed(channel, e.to_string())
            }
        }
    }

    /// Upcoming shows from every channel page, then the site-wide page
    pub async fn get_schedule(&self) -> AggregatedSchedule {
        self.collect_schedule(None).await
    }

    /// Like [`get_schedule`](Self::get_schedule) but every fetch shares one
    /// deadline. Sources not reached in time contribute nothing; entries
    /// already collected are kept.
    pub async fn get_schedule_within(&self, limit: Duration) -> AggregatedSchedule {
        self.collect_schedule(Some(Instant::now() + limit)).await
    }

    async fn collect_schedule(&self, deadline: Option<Instant>) -> AggregatedSchedule {
        if self.registry.is_empty() {
            warn!("Schedule requested with no registered channels");
            return AggregatedSchedule::failed("no channels registered");
        }

        let mut accumulator = ScheduleAccumulator::new();

        for channel in self.registry.channels() {
            let kept = accumulator.extend(self.channel_schedule(channel, deadline).await);
            debug!("Channel '{}' contributed {} schedule entries", channel.id, kept);
        }

        let kept = accumulator.extend(self.site_schedule(deadline).await);
        debug!("Site schedule contributed {} entries", kept);

        info!(
            "Aggregated {} upcoming shows ({} duplicates dropped)",
            accumulator.len(),
            accumulator.dropped()
        );
        accumulator.into_schedule()
    }

    async fn channel_schedule(
        &self,
        channel: &Channel,
        deadline: Option<Instant>,
    ) -> Vec<ScheduleEntry> {
        let page = match self.fetch_before(&channel.source_url, deadline).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping schedule for '{}': {}", channel.id, e);
                return Vec::new();
            }
        };

        let heading = self.channel_heading_for(channel);
        self.schedule_extractor
            .extract(&page, &heading)
            .into_iter()
            .map(|entry| entry.for_channel(channel))
            .collect()
    }

    async fn site_schedule(&self, deadline: Option<Instant>) -> Vec<ScheduleEntry> {
        match self.fetch_before(&self.schedule_url, deadline).await {
            Ok(page) => self.schedule_extractor.extract(&page, &self.site_heading),
            Err(e) => {
                warn!("Skipping site schedule page: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch `url`, giving up with a source timeout once `deadline` passes
    async fn fetch_before(&self, url: &str, deadline: Option<Instant>) -> SourceResult<String> {
        let Some(deadline) = deadline else {
            return self.fetcher.fetch_text(url).await;
        };
        tokio::time::timeout_at(deadline, self.fetcher.fetch_text(url))
            .await
            .unwrap_or_else(|_| Err(SourceError::timeout(url)))
    }

    fn channel_heading_for(&self, channel: &Channel) -> String {
        self.channel_heading
            .replace(CHANNEL_PLACEHOLDER, &channel.display_name)
    }
}
