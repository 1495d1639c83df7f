//! Guide configuration
//!
//! Everything a [`ScheduleClient`](crate::ScheduleClient) needs to know about
//! the remote guide lives here rather than in globals, so clients pointed at
//! different endpoints can coexist.

use crate::channel::ChannelRegistry;

/// Listings form endpoint
pub const DEFAULT_BASE_URL: &str = "http://www.indya.com/uk/tvguide/tvguide.asp";

/// Default User-Agent mimicking a modern browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the guide client
#[derive(Debug, Clone)]
pub struct GuideConfig {
    /// URL the listings form is posted to
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Channel keys accepted by `get_listings`
    pub channels: ChannelRegistry,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            channels: ChannelRegistry::default(),
        }
    }
}

impl GuideConfig {
    /// Default configuration posting to `base_url` instead.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
