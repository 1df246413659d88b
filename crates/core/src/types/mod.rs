//! Core types for BookVerse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod genre;
pub mod id;
pub mod price;

pub use genre::{Genre, GenreParseError};
pub use id::*;
pub use price::Price;
