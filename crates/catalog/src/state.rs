//! Application state shared across handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bookverse_core::Catalog;

use crate::config::CatalogConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is fixed at
/// startup, so handlers read it concurrently without locks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    catalog: Catalog,
    hostname: String,
    started_at: Instant,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Catalog service configuration
    /// * `catalog` - The seeded, read-only book catalog
    #[must_use]
    pub fn new(config: CatalogConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                hostname: local_hostname(),
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the book catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Host name of the machine serving this process.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.inner.hostname
    }

    /// Time since the state was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }
}

fn local_hostname() -> String {
    hostname::get().map_or_else(
        |e| {
            tracing::warn!("Failed to read hostname: {e}");
            "unknown".to_string()
        },
        |name| name.to_string_lossy().into_owned(),
    )
}
