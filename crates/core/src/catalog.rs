//! The read-only book catalog.
//!
//! A [`Catalog`] is built once (from the built-in seed or a JSON file) and
//! only ever read afterwards, so it can be shared between request handlers
//! behind an `Arc` without any locking.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::book::Book;
use crate::types::{BookId, Genre, Price};

/// Errors from building or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with this ID.
    #[error("Book not found: {0}")]
    NotFound(BookId),

    /// Two seed records share an ID.
    #[error("duplicate book id {0}")]
    DuplicateId(BookId),

    /// Seed record ID is zero or negative.
    #[error("book id {0} must be positive")]
    InvalidId(BookId),

    /// Seed record has a price below zero.
    #[error("book {id} has a negative price ({price})")]
    NegativePrice { id: BookId, price: Price },

    /// Seed file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not a JSON array of books.
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Aggregate figures reported by the service metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    /// Book count per genre. Genres with no books are omitted.
    pub genres: BTreeMap<Genre, usize>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    /// Mean price rounded to cents.
    pub average_price: Option<Price>,
}

/// The fixed set of purchasable books, in definition order.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog from seed records.
    ///
    /// # Errors
    ///
    /// Returns an error if an ID is repeated or not positive, or if a price
    /// is negative.
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !book.id.is_valid() {
                return Err(CatalogError::InvalidId(book.id));
            }
            if !seen.insert(book.id) {
                return Err(CatalogError::DuplicateId(book.id));
            }
            if book.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: book.id,
                    price: book.price,
                });
            }
        }
        Ok(Self { books })
    }

    /// Load seed records from a JSON array on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// records fail validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let books: Vec<Book> = serde_json::from_str(&content)?;
        let catalog = Self::new(books)?;
        tracing::info!(path = %path.display(), books = catalog.len(), "Loaded catalog seed file");
        Ok(catalog)
    }

    /// The built-in BookVerse catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            books: seed_books(),
        }
    }

    /// All books in catalog-definition order.
    #[must_use]
    pub fn list_books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a single book.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no book has this ID.
    pub fn get_book(&self, id: BookId) -> Result<&Book, CatalogError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Summary figures for the metadata endpoint.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut genres = BTreeMap::new();
        for book in &self.books {
            *genres.entry(book.genre).or_insert(0) += 1;
        }

        let min_price = self.books.iter().map(|b| b.price).min();
        let max_price = self.books.iter().map(|b| b.price).max();
        let average_price = (!self.books.is_empty()).then(|| {
            let total: Price = self.books.iter().map(|b| b.price).sum();
            Price::new((total.amount() / Decimal::from(self.books.len())).round_dp(2))
        });

        CatalogStats {
            total_books: self.books.len(),
            genres,
            min_price,
            max_price,
            average_price,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_books() -> Vec<Book> {
    vec![
        Book::new(
            BookId::new(1),
            "The Pragmatic Programmer",
            "David Thomas & Andrew Hunt",
            Genre::Technology,
            Price::from_cents(3499),
            "💻",
            "Timeless advice on craftsmanship, tooling and career growth for software developers.",
        ),
        Book::new(
            BookId::new(2),
            "Designing Data-Intensive Applications",
            "Martin Kleppmann",
            Genre::Technology,
            Price::from_cents(4499),
            "🗄️",
            "The big ideas behind reliable, scalable and maintainable data systems.",
        ),
        Book::new(
            BookId::new(3),
            "Dune",
            "Frank Herbert",
            Genre::ScienceFiction,
            Price::from_cents(1899),
            "🏜️",
            "A desert planet, a precious spice and a young heir caught in an interstellar feud.",
        ),
        Book::new(
            BookId::new(4),
            "The Hobbit",
            "J.R.R. Tolkien",
            Genre::Fantasy,
            Price::from_cents(1499),
            "🐉",
            "Bilbo Baggins is swept into a quest to reclaim a dwarven kingdom from a dragon.",
        ),
        Book::new(
            BookId::new(5),
            "The Hound of the Baskervilles",
            "Arthur Conan Doyle",
            Genre::Mystery,
            Price::from_cents(999),
            "🔍",
            "Sherlock Holmes investigates a family curse on the foggy moors of Devon.",
        ),
        Book::new(
            BookId::new(6),
            "Sapiens",
            "Yuval Noah Harari",
            Genre::History,
            Price::from_cents(2250),
            "🌍",
            "A brief history of humankind from the Stone Age to the present.",
        ),
        Book::new(
            BookId::new(7),
            "Atomic Habits",
            "James Clear",
            Genre::SelfHelp,
            Price::from_cents(2199),
            "⚛️",
            "Small changes, remarkable results: a practical guide to building good habits.",
        ),
        Book::new(
            BookId::new(8),
            "Foundation",
            "Isaac Asimov",
            Genre::ScienceFiction,
            Price::from_cents(1699),
            "🌌",
            "A mathematician predicts the fall of a galactic empire and plans for what comes after.",
        ),
    ]
}
