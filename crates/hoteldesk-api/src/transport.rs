// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("hoteldesk/", env!("CARGO_PKG_VERSION"));

/// Transport settings for the hotel API client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` lets requests run until the server
    /// or the connection gives up.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Config with a request timeout. A zero duration means no timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: (!timeout.is_zero()).then_some(timeout),
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_none() {
        assert_eq!(TransportConfig::with_timeout(Duration::ZERO).timeout, None);
        assert_eq!(
            TransportConfig::with_timeout(Duration::from_secs(5)).timeout,
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn default_has_no_timeout() {
        assert!(TransportConfig::default().timeout.is_none());
    }
}
