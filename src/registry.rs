//! Channel registry
//!
//! The ordered set of channels the service reports on. Built once from
//! configuration and shared read-only between requests.

use std::sync::Arc;

use crate::config::ChannelConfig;
use crate::models::Channel;

#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Arc<[Channel]>,
}

impl ChannelRegistry {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels: channels.into(),
        }
    }

    pub fn from_config(channels: &[ChannelConfig]) -> Self {
        Self::new(channels.iter().map(Channel::from).collect())
    }

    /// Channels in registration order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
