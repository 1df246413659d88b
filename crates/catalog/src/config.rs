//! Catalog service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CATALOG_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `VERSION` - Deployed release version (default: 1.0.0)
//! - `COLOR` - Blue-green slot of this deployment (default: unknown)
//! - `BUILD_NUMBER` - CI build number (default: unknown)
//! - `CATALOG_BOOKS_FILE` - JSON seed file; the built-in catalog is used when unset
//! - `CATALOG_STATIC_DIR` - Directory served under `/static`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Blue-green deployment metadata
    pub deployment: DeploymentConfig,
    /// Seed file replacing the built-in catalog
    pub books_file: Option<PathBuf>,
    /// Static asset directory
    pub static_dir: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Deployment metadata reported by `/version`, `/api` and `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub version: String,
    pub color: String,
    pub build_number: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            color: "unknown".to_string(),
            build_number: "unknown".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or port cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CATALOG_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            deployment: DeploymentConfig::from_env(),
            books_file: get_optional_env("CATALOG_BOOKS_FILE").map(PathBuf::from),
            static_dir: get_optional_env("CATALOG_STATIC_DIR").map(PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            deployment: DeploymentConfig::default(),
            books_file: None,
            static_dir: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl DeploymentConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            version: get_optional_env("VERSION").unwrap_or(defaults.version),
            color: get_optional_env("COLOR").unwrap_or(defaults.color),
            build_number: get_optional_env("BUILD_NUMBER").unwrap_or(defaults.build_number),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
