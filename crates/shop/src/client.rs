//! HTTP client for the catalog service.
//!
//! The [`CatalogSource`] and [`StatusSource`] traits are the seams the cart
//! controller and the deployment monitor depend on. [`HttpCatalogClient`]
//! implements both over reqwest; tests substitute in-memory sources.

use std::future::Future;

use bookverse_core::{Book, BookId, HealthStatus, VersionInfo};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ShopConfig;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, bad body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with an unexpected status.
    #[error("{url} returned {status}")]
    Status { status: u16, url: String },

    /// Service reported the book does not exist.
    #[error("Book not found: {0}")]
    NotFound(BookId),

    /// Base URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Whether this is a transport or server failure rather than a
    /// definitive "not found" answer.
    #[must_use]
    pub const fn is_network_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

/// Read access to the book catalog.
pub trait CatalogSource: Send + Sync {
    /// Fetch the full listing in catalog order.
    fn list_books(&self) -> impl Future<Output = Result<Vec<Book>, ClientError>> + Send;

    /// Fetch a single book.
    fn get_book(&self, id: BookId) -> impl Future<Output = Result<Book, ClientError>> + Send;
}

/// Read access to deployment metadata.
pub trait StatusSource: Send + Sync {
    /// Fetch `/version`.
    fn version(&self) -> impl Future<Output = Result<VersionInfo, ClientError>> + Send;

    /// Fetch `/health`.
    fn health(&self) -> impl Future<Output = Result<HealthStatus, ClientError>> + Send;
}

/// reqwest-backed client for a running catalog service.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the service at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ShopConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("bookverse-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// The service base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

impl CatalogSource for HttpCatalogClient {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let url = self.endpoint("api/books")?;
        self.get_json(url).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ClientError> {
        let url = self.endpoint(&format!("api/books/{id}"))?;
        match self.get_json(url).await {
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(ClientError::NotFound(id))
            }
            other => other,
        }
    }
}

impl StatusSource for HttpCatalogClient {
    async fn version(&self) -> Result<VersionInfo, ClientError> {
        let url = self.endpoint("version")?;
        self.get_json(url).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint("health")?;
        self.get_json(url).await
    }
}
