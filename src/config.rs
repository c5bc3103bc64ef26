//! Application-level configuration loading: trivia API location and fetch behaviour.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};
use thiserror::Error;
use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TRIVIA_BOARD_CONFIG_PATH";
/// Environment variable that overrides the trivia API base URL.
const API_BASE_URL_ENV: &str = "TRIVIA_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "https://jservice.io/api";
const DEFAULT_CATEGORY_POOL_SIZE: usize = 75;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How the per-category clue requests of a fetch phase are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// One request at a time, each awaited before the next.
    Sequential,
    /// All requests in flight at once, joined in selection order.
    #[default]
    Concurrent,
}

/// Errors raised while parsing a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`RawConfig`].
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but holds out-of-range values.
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    api_base_url: String,
    category_pool_size: usize,
    request_timeout: Duration,
    fetch_mode: FetchMode,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults,
    /// then apply the base URL environment override.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        api_base_url = %config.api_base_url,
                        fetch_mode = ?config.fetch_mode,
                        "loaded config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to load config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        match env::var(API_BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!(%url, "trivia API base URL overridden from environment");
                config.with_api_base_url(url)
            }
            _ => config,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        raw.validate()?;
        Ok(raw.into())
    }

    /// Replace the trivia API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Replace the fetch mode.
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Base URL of the trivia API, without trailing path.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Number of candidate categories requested per game.
    pub fn category_pool_size(&self) -> usize {
        self.category_pool_size
    }

    /// Per-request timeout for trivia API calls.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// How clue requests are issued.
    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[validate(url)]
    api_base_url: String,
    #[validate(range(min = 6, max = 100))]
    category_pool_size: usize,
    #[serde(rename = "request_timeout_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[validate(custom(function = "validate_timeout"))]
    request_timeout: Duration,
    fetch_mode: FetchMode,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            category_pool_size: DEFAULT_CATEGORY_POOL_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fetch_mode: FetchMode::default(),
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            api_base_url: value.api_base_url,
            category_pool_size: value.category_pool_size,
            request_timeout: value.request_timeout,
            fetch_mode: value.fetch_mode,
        }
    }
}

fn validate_timeout(timeout: &Duration) -> Result<(), ValidationError> {
    if timeout.is_zero() {
        let mut err = ValidationError::new("request_timeout_zero");
        err.message = Some("request timeout must be strictly positive".into());
        return Err(err);
    }
    Ok(())
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
