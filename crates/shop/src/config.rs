//! Client-side session configuration.

use std::time::Duration;

use url::Url;

use crate::client::ClientError;

/// Default catalog service location.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// How often the deployment banner is refreshed, to catch blue-green switches.
pub const DEFAULT_VERSION_INTERVAL: Duration = Duration::from_secs(10);

/// How often the health line is refreshed.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Per-request timeout; a hung service surfaces as a network failure.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shopping session configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Catalog service base URL
    pub base_url: Url,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Deployment banner poll interval
    pub version_interval: Duration,
    /// Health line poll interval
    pub health_interval: Duration,
}

impl ShopConfig {
    /// Configuration with default timings for the given service URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            version_interval: DEFAULT_VERSION_INTERVAL,
            health_interval: DEFAULT_HEALTH_INTERVAL,
        })
    }
}
