//! CLI subcommands.

pub mod books;
pub mod render;
pub mod shop;
pub mod status;
