// Shared transport configuration for building reqwest::Client instances.
//
// The vendor API only accepts requests that look like they come from a
// browser, so the User-Agent is part of the transport, not the caller.

use std::time::Duration;

use crate::error::Error;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://rituals.sense-company.com";

/// Fixed browser User-Agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: BROWSER_USER_AGENT.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_uses_browser_agent() {
        let config = TransportConfig::default();
        assert_eq!(config.user_agent, BROWSER_USER_AGENT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.contains("Chrome/51.0.2704.103"));
    }

    #[test]
    fn timeout_override() {
        let config = TransportConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
