//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! bookverse books list --search "data"
//! bookverse books list --genre fantasy
//! bookverse books show 4
//! ```

use bookverse_core::{BookFilter, BookId, GenreParseError};
use bookverse_shop::{CatalogSource, CatalogView, ClientError, LOAD_ERROR_MESSAGE, load_catalog};
use thiserror::Error;

use super::render;

/// Errors from the `books` commands.
#[derive(Debug, Error)]
pub enum BooksError {
    /// The listing could not be fetched.
    #[error("{LOAD_ERROR_MESSAGE}")]
    Unavailable,

    /// The `--genre` value is not a known genre.
    #[error(transparent)]
    Genre(#[from] GenreParseError),

    /// A single-book lookup failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Print the books that pass both the genre and the search filter.
///
/// # Errors
///
/// Returns an error if the genre is unknown or the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn list<S: CatalogSource>(
    source: &S,
    search: Option<&str>,
    genre: Option<&str>,
) -> Result<(), BooksError> {
    let genre_filter = genre.map(BookFilter::genre).transpose()?.unwrap_or_default();
    let search_filter = search.map(BookFilter::search).unwrap_or_default();

    let view = load_catalog(source)
        .await
        .filtered(&genre_filter)
        .filtered(&search_filter);

    match view {
        CatalogView::Unavailable => Err(BooksError::Unavailable),
        CatalogView::Loaded(books) if books.is_empty() => {
            println!("No books match.");
            Ok(())
        }
        CatalogView::Loaded(books) => {
            for book in &books {
                println!("{}", render::book_line(book));
            }
            Ok(())
        }
    }
}

/// Print one book's card.
///
/// # Errors
///
/// Returns [`ClientError::NotFound`] for an unknown ID, or the transport error.
#[allow(clippy::print_stdout)]
pub async fn show<S: CatalogSource>(source: &S, id: BookId) -> Result<(), BooksError> {
    let book = source.get_book(id).await?;
    println!("{}", render::book_card(&book));
    Ok(())
}
