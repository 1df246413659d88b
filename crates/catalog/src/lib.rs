//! BookVerse catalog service library.
//!
//! This crate provides the catalog HTTP service as a library, allowing the
//! router to be tested in-process and embedded by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use bookverse_core::{Catalog, CatalogError};

use crate::config::CatalogConfig;

/// Build the catalog named by the configuration: the seed file when one is
/// set, otherwise the built-in books.
///
/// # Errors
///
/// Returns an error if the seed file cannot be read or fails validation.
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    match config.books_file.as_ref() {
        Some(path) => Catalog::from_json_file(path),
        None => Ok(Catalog::seeded()),
    }
}
