//! Integration tests for BookVerse.
//!
//! Each test starts the catalog service in-process on an ephemeral port and
//! talks to it over real HTTP, either with `reqwest` directly or through the
//! shop client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_api` - Wire format of the catalog service
//! - `cart_session` - Shopping sessions against a live catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use bookverse_catalog::config::{CatalogConfig, DeploymentConfig};
use bookverse_catalog::routes;
use bookverse_catalog::state::AppState;
use bookverse_core::Catalog;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A catalog service running on a local ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the seeded catalog as the blue slot.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(Catalog::seeded(), "blue").await
    }

    /// Serve `catalog` under the given deployment color.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start_with(catalog: Catalog, color: &str) -> std::io::Result<Self> {
        let config = CatalogConfig {
            deployment: DeploymentConfig {
                version: "2.1.0".to_string(),
                color: color.to_string(),
                build_number: "42".to_string(),
            },
            ..CatalogConfig::default()
        };
        let app = routes::app(AppState::new(config, catalog));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, handle })
    }

    /// Base URL with a trailing slash.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub async fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/"))
}
