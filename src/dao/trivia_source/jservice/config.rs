use std::time::Duration;

use crate::config::AppConfig;

/// Default per-request timeout applied by the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration describing how to reach the trivia API.
#[derive(Debug, Clone)]
pub struct JServiceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl JServiceConfig {
    /// Construct a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl From<&AppConfig> for JServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.api_base_url()).with_request_timeout(config.request_timeout())
    }
}
