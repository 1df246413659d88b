//! Visibility filters over a book listing.
//!
//! Filtering only decides which books are shown. It borrows the listing and
//! returns references, so neither the catalog nor any cart can be changed by
//! it.

use crate::book::Book;
use crate::types::{Genre, GenreParseError};

/// Which books to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookFilter {
    /// Show everything.
    #[default]
    All,
    /// Case-insensitive substring match over the text shown on a book card
    /// (title, author, genre, description and price).
    Search(String),
    /// Only books of this genre.
    Genre(Genre),
}

impl BookFilter {
    /// Build a text search filter. Blank input shows everything.
    #[must_use]
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            Self::All
        } else {
            Self::Search(term.to_lowercase())
        }
    }

    /// Build a genre filter from a label; `all` shows everything.
    ///
    /// # Errors
    ///
    /// Returns [`GenreParseError`] if the label names no known genre.
    pub fn genre(label: &str) -> Result<Self, GenreParseError> {
        if label.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        label.parse().map(Self::Genre)
    }

    /// Whether `book` is visible under this filter.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => book.genre == *genre,
            Self::Search(term) => card_text(book).contains(term.as_str()),
        }
    }
}

/// The visible subset of `books`, in their original order.
#[must_use]
pub fn visible<'a>(books: &'a [Book], filter: &BookFilter) -> Vec<&'a Book> {
    books.iter().filter(|book| filter.matches(book)).collect()
}

fn card_text(book: &Book) -> String {
    format!(
        "{} {} by {} {} {} {}",
        book.emoji, book.title, book.author, book.genre, book.description, book.price
    )
    .to_lowercase()
}
