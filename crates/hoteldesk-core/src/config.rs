// ── Runtime client configuration ──
//
// What the Controller needs to talk to the hotel API. Built by the CLI/TUI
// from the on-disk profile plus flag overrides; core never reads files.

use std::time::Duration;

use hoteldesk_api::TransportConfig;
use url::Url;

use crate::error::CoreError;

/// Production API used when no profile overrides it.
pub const DEFAULT_API_URL: &str = "https://management-hotel.onrender.com";

/// Connection settings for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `https://management-hotel.onrender.com`.
    pub api_url: Url,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: None,
        }
    }

    /// Parse `api_url`, mapping failures to [`CoreError::Config`].
    pub fn parse(api_url: &str) -> Result<Self, CoreError> {
        let url = Url::parse(api_url.trim()).map_err(|e| CoreError::Config {
            message: format!("invalid API URL '{api_url}': {e}"),
        })?;
        Ok(Self::new(url))
    }

    /// Set the timeout in whole seconds; `0` disables it.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.as_str(), "https://management-hotel.onrender.com/");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn zero_timeout_disables() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert!(config.timeout.is_none());

        let config = ClientConfig::default().with_timeout_secs(15);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = ClientConfig::parse("not a url").unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
