use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for one whole aggregation pass
    #[serde(default = "default_aggregation_timeout")]
    pub aggregation_timeout: String,
}

/// Where pages are fetched from and how the client identifies itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
    /// Path of the site-wide schedule page, relative to `base_url`
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Heading searched on each channel page. `{channel}` is replaced by the
    /// channel display name.
    #[serde(default = "default_channel_heading")]
    pub channel_heading: String,
    #[serde(default = "default_site_heading")]
    pub site_heading: String,
    /// Markers that terminate a schedule section
    #[serde(default = "default_boundary_markers")]
    pub boundary_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_status_max_age")]
    pub status_max_age_secs: u32,
    #[serde(default = "default_schedule_max_age")]
    pub schedule_max_age_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_aggregation_timeout() -> String {
    DEFAULT_AGGREGATION_TIMEOUT.to_string()
}

// Source defaults
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout() -> String {
    DEFAULT_REQUEST_TIMEOUT.to_string()
}

fn default_schedule_path() -> String {
    DEFAULT_SCHEDULE_PATH.to_string()
}

// Schedule defaults
fn default_channel_heading() -> String {
    DEFAULT_CHANNEL_HEADING.to_string()
}

fn default_site_heading() -> String {
    DEFAULT_SITE_HEADING.to_string()
}

fn default_boundary_markers() -> Vec<String> {
    DEFAULT_BOUNDARY_MARKERS.iter().map(|m| m.to_string()).collect()
}

// Cache defaults
fn default_status_max_age() -> u32 {
    DEFAULT_STATUS_MAX_AGE_SECS
}

fn default_schedule_max_age() -> u32 {
    DEFAULT_SCHEDULE_MAX_AGE_SECS
}

fn station(
    id: &str,
    name: &str,
    genre: &str,
    description: &str,
    stream: &str,
) -> ChannelConfig {
    ChannelConfig {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("{DEFAULT_BASE_URL}/{id}/"),
        genre: Some(genre.to_string()),
        description: Some(description.to_string()),
        stream_url: Some(format!("{DEFAULT_BASE_URL}/stream/{stream}.mp3")),
    }
}

fn default_channels() -> Vec<ChannelConfig> {
    vec![
        station(
            "clubzone",
            "ClubZone",
            "Club / EDM / Dance",
            "House, dance, electro, fidget and more",
            "channel1",
        ),
        station(
            "hypnotica",
            "Hypnotica",
            "Deep / Soulful / Tech",
            "Deep house, soulful, tech and more",
            "channel3",
        ),
        station(
            "powerbase",
            "PowerBase",
            "Trance / DnB / Energy",
            "Trance, drum & bass, high energy",
            "channel4",
        ),
        station(
            "thegrind",
            "TheGrind",
            "HipHop / RnB / Top40",
            "Hip-hop, R&B, mainstream hits",
            "channel2",
        ),
    ]
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            aggregation_timeout: default_aggregation_timeout(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            schedule_path: default_schedule_path(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            channel_heading: default_channel_heading(),
            site_heading: default_site_heading(),
            boundary_markers: default_boundary_markers(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            status_max_age_secs: default_status_max_age(),
            schedule_max_age_secs: default_schedule_max_age(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            source: SourceConfig::default(),
            schedule: ScheduleConfig::default(),
            cache: CacheConfig::default(),
            channels: default_channels(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> AppResult<Duration> {
        parse_duration("source.request_timeout", &self.request_timeout)
    }

    /// Absolute URL of the site-wide schedule page
    pub fn schedule_url(&self) -> AppResult<url::Url> {
        let base = url::Url::parse(&self.base_url).map_err(|e| {
            AppError::configuration(format!("source.base_url '{}': {e}", self.base_url))
        })?;
        base.join(&self.schedule_path).map_err(|e| {
            AppError::configuration(format!(
                "source.schedule_path '{}': {e}",
                self.schedule_path
            ))
        })
    }
}

impl WebConfig {
    pub fn aggregation_timeout(&self) -> AppResult<Duration> {
        parse_duration("web.aggregation_timeout", &self.aggregation_timeout)
    }
}

fn parse_duration(field: &str, value: &str) -> AppResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| AppError::configuration(format!("{field} '{value}': {e}")))
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let config = Self::load_from_file(&config_file)?;
        info!("Configuration loaded from: {}", config_file);
        Ok(config)
    }

    pub fn load_from_file(config_file: &str) -> AppResult<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file).map_err(|e| {
                AppError::configuration(format!("failed to read {config_file}: {e}"))
            })?;
            Self::from_toml_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::configuration(e.to_string()))?;
            std::fs::write(config_file, contents).map_err(|e| {
                AppError::configuration(format!("failed to write {config_file}: {e}"))
            })?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::configuration(e.to_string()))
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.channels.is_empty() {
            return Err(AppError::configuration("at least one channel is required"));
        }

        let mut seen = HashSet::new();
        for channel in &self.channels {
            if channel.id.trim().is_empty() {
                return Err(AppError::configuration(format!(
                    "channel '{}' has an empty id",
                    channel.name
                )));
            }
            if !seen.insert(channel.id.as_str()) {
                return Err(AppError::configuration(format!(
                    "duplicate channel id '{}'",
                    channel.id
                )));
            }
            url::Url::parse(&channel.url).map_err(|e| {
                AppError::configuration(format!(
                    "channel '{}' url '{}': {e}",
                    channel.id, channel.url
                ))
            })?;
        }

        let request_timeout = self.source.request_timeout()?;
        self.source.schedule_url()?;
        let aggregation_timeout = self.web.aggregation_timeout()?;

        // Schedule mode fetches every channel page and then the site page in turn
        let sequential_fetches = self.channels.len() as u32 + 1;
        let worst_case = request_timeout * sequential_fetches;
        if aggregation_timeout < worst_case {
            return Err(AppError::configuration(format!(
                "web.aggregation_timeout ({}) must cover {} sequential fetches of source.request_timeout ({}), at least {}",
                self.web.aggregation_timeout,
                sequential_fetches,
                self.source.request_timeout,
                humantime::format_duration(worst_case)
            )));
        }

        if self.cache.status_max_age_secs >= self.cache.schedule_max_age_secs {
            return Err(AppError::configuration(format!(
                "cache.status_max_age_secs ({}) must be shorter than cache.schedule_max_age_secs ({})",
                self.cache.status_max_age_secs, self.cache.schedule_max_age_secs
            )));
        }

        Ok(())
    }
}
