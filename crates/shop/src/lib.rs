//! BookVerse shopping session.
//!
//! Everything a client needs to shop against the catalog service:
//!
//! - [`client`] - HTTP client for the catalog, health and version endpoints
//! - [`controller`] - The cart controller, one per session
//! - [`view`] - Catalog listing with the static error fallback
//! - [`monitor`] - Background polling for the blue-green deployment banner
//!
//! The cart itself lives in `bookverse_core::cart`; this crate wires it to
//! the network. Each [`CartController`] owns its cart, so separate sessions
//! never share state.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookverse_core::BookId;
//! use bookverse_shop::{CartController, HttpCatalogClient, ShopConfig};
//!
//! let config = ShopConfig::new("http://127.0.0.1:3000")?;
//! let client = HttpCatalogClient::new(&config)?;
//! let mut session = CartController::new(client);
//!
//! let note = session.add_to_cart(BookId::new(1)).await?;
//! println!("{note}");
//! let outcome = session.checkout();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod controller;
pub mod monitor;
pub mod view;

pub use client::{CatalogSource, ClientError, HttpCatalogClient, StatusSource};
pub use config::ShopConfig;
pub use controller::{CartController, ControllerError};
pub use monitor::{DeploymentMonitor, HealthIndicator};
pub use view::{CatalogView, LOAD_ERROR_MESSAGE, load_catalog};
