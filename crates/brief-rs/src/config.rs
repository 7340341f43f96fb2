//! Submission endpoint configuration with sensible defaults.

use std::time::Duration;

/// Environment variable that overrides the endpoint URL.
pub const ENDPOINT_ENV: &str = "BRIEF_ENDPOINT";

/// Where and how the answer set is submitted.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Endpoint URL. Default: [`DEFAULT_ENDPOINT`](crate::DEFAULT_ENDPOINT).
    pub url: String,
    /// Request timeout. A timed-out request counts as a transport failure.
    /// Default: 30 seconds. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// `User-Agent` header. Default: `brief-rs/<version>`.
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: crate::DEFAULT_ENDPOINT.to_string(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("brief-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EndpointConfig {
    /// Defaults, with the URL taken from `BRIEF_ENDPOINT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENDPOINT_ENV)
            && !url.trim().is_empty()
        {
            config.url = url.trim().to_string();
        }
        config
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply optional command-line overrides. A timeout of `0` seconds
    /// disables the timeout.
    pub fn with_overrides(mut self, url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        self
    }
}
