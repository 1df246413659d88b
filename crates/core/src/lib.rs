//! BookVerse Core - Shared domain types.
//!
//! This crate provides the types used across all BookVerse components:
//! - `catalog` - The catalog HTTP service (serves books and deployment metadata)
//! - `shop` - The client-side cart controller and its catalog client
//! - `cli` - Terminal front end for browsing and shopping
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no network I/O, no
//! HTTP clients. Reading a seed file is the one exception, and it happens
//! once at service start.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for book IDs, prices and genres
//! - [`book`] - The immutable `Book` record
//! - [`catalog`] - The read-only book set and its lookups
//! - [`cart`] - The per-session cart state machine
//! - [`filter`] - Pure visibility filters over a book listing
//! - [`notification`] - User-visible messages produced by cart actions
//! - [`deployment`] - Health and version wire types for blue-green banners

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod book;
pub mod cart;
pub mod catalog;
pub mod deployment;
pub mod filter;
pub mod notification;
pub mod types;

pub use book::Book;
pub use cart::{Cart, CartError, CartItemView, CartView, CheckoutOutcome};
pub use catalog::{Catalog, CatalogError, CatalogStats};
pub use deployment::{HealthStatus, VersionInfo};
pub use filter::{BookFilter, visible};
pub use notification::{Notification, NotificationKind};
pub use types::*;
