use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ChannelConfig;

/// Display name used when no DJ identity can be resolved
pub const DEFAULT_DJ_NAME: &str = "AutoDJ";

/// Show name used when no show can be resolved
pub const DEFAULT_SHOW_NAME: &str = "Mixed Hits";

/// One broadcast channel with its own source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

impl Channel {
    pub fn new(id: &str, display_name: &str, source_url: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            source_url: source_url.to_string(),
            genre: None,
            description: None,
            stream_url: None,
        }
    }
}

impl From<&ChannelConfig> for Channel {
    fn from(config: &ChannelConfig) -> Self {
        Self {
            id: config.id.clone(),
            display_name: config.name.clone(),
            source_url: config.url.clone(),
            genre: config.genre.clone(),
            description: config.description.clone(),
            stream_url: config.stream_url.clone(),
        }
    }
}

/// Now-playing state of one channel, captured during one poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatus {
    #[serde(rename = "channel")]
    pub channel_id: String,
    pub channel_name: String,
    pub is_live: bool,
    pub is_replay: bool,
    pub dj_name: String,
    pub show_name: String,
    pub dj_slug: String,
    pub dj_image: String,
    pub dj_profile_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelStatus {
    /// Default-filled status for a channel whose page could not be processed
    pub fn failed(channel: &Channel, message: impl Into<String>) -> Self {
        Self {
            channel_id: channel.id.clone(),
            channel_name: channel.display_name.clone(),
            is_live: false,
            is_replay: false,
            dj_name: DEFAULT_DJ_NAME.to_string(),
            show_name: DEFAULT_SHOW_NAME.to_string(),
            dj_slug: String::new(),
            dj_image: String::new(),
            dj_profile_url: None,
            timestamp: Utc::now(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One upcoming show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Time of day as written on the page
    pub time: String,
    pub dj_name: String,
    pub show_name: String,
    #[serde(rename = "channel", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
}

impl ScheduleEntry {
    /// Attach the channel the entry was found on
    pub fn for_channel(mut self, channel: &Channel) -> Self {
        self.channel_id = Some(channel.id.clone());
        self.channel_name = Some(channel.display_name.clone());
        self
    }
}

/// Upcoming shows merged across every source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSchedule {
    pub upcoming: Vec<ScheduleEntry>,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AggregatedSchedule {
    pub fn new(upcoming: Vec<ScheduleEntry>) -> Self {
        Self {
            count: upcoming.len(),
            upcoming,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Empty schedule carrying a top-level error
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            upcoming: Vec::new(),
            count: 0,
            timestamp: Utc::now(),
            error: Some(message.into()),
        }
    }
}
