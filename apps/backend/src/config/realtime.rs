//! Configuration for the external realtime chat/video/feeds platform.

use crate::config::{require_env, trim_base_url};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.realtime-chat.io";
const DEFAULT_COMMUNITY_CHANNELS: &str = "community:general";

/// Credentials and provisioning directives for the realtime platform.
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Public API key, echoed back to clients so they can connect.
    pub api_key: String,
    /// API secret used as the HS256 signing key. Never leaves the server.
    pub api_secret: String,
    /// Application id for deployments with a dedicated feeds app.
    pub app_id: Option<String>,
    /// Management API base URL.
    pub base_url: String,
    /// Channels every member is joined to on token issuance (cid form,
    /// e.g. `community:general`).
    pub community_channels: Vec<String>,
    /// Community feed each user's timeline follows, if feeds are enabled.
    pub community_feed: Option<String>,
}

impl RealtimeConfig {
    /// Load from environment. `REALTIME_API_KEY` and `REALTIME_API_SECRET`
    /// are required; everything else has workable defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = require_env("REALTIME_API_KEY")?;
        let api_secret = require_env("REALTIME_API_SECRET")?;

        let app_id = std::env::var("REALTIME_APP_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let base_url = std::env::var("REALTIME_BASE_URL")
            .map(|v| trim_base_url(&v))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let community_channels = match std::env::var("REALTIME_COMMUNITY_CHANNELS") {
            Ok(raw) => parse_channel_list(&raw),
            Err(_) => parse_channel_list(DEFAULT_COMMUNITY_CHANNELS),
        };

        let community_feed = std::env::var("REALTIME_COMMUNITY_FEED")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key,
            api_secret,
            app_id,
            base_url,
            community_channels,
            community_feed,
        })
    }

    pub fn community_enabled(&self) -> bool {
        !self.community_channels.is_empty()
    }
}

/// Parse a comma-separated channel list, dropping empty entries.
pub fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_channel_list;

    #[test]
    fn parses_comma_separated_channels() {
        assert_eq!(
            parse_channel_list("community:general, community:tips"),
            vec!["community:general".to_string(), "community:tips".to_string()]
        );
    }

    #[test]
    fn empty_list_disables_community_channels() {
        assert!(parse_channel_list("").is_empty());
        assert!(parse_channel_list(" , ,").is_empty());
    }
}
