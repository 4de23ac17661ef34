/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_AGGREGATION_TIMEOUT: &str = "60s";

// Source site defaults
pub const DEFAULT_BASE_URL: &str = "https://virtualdjradio.com";
pub const DEFAULT_USER_AGENT: &str = "VDJRadio-App/1.0";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub const DEFAULT_SCHEDULE_PATH: &str = "/schedule/";

// Schedule section markers
pub const DEFAULT_CHANNEL_HEADING: &str = "Upcoming Shows";
pub const DEFAULT_SITE_HEADING: &str = "Upcoming Events";
pub const DEFAULT_BOUNDARY_MARKERS: &[&str] =
    &["Track History", "Recently Played", "Top DJs", "<footer"];

// Cache lifetimes (seconds)
pub const DEFAULT_STATUS_MAX_AGE_SECS: u32 = 30;
pub const DEFAULT_SCHEDULE_MAX_AGE_SECS: u32 = 60;
