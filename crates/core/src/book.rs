//! The catalog's book record.

use serde::{Deserialize, Serialize};

use crate::types::{BookId, Genre, Price};

/// A purchasable book.
///
/// Books are seeded once when the catalog service starts and never change
/// afterwards. Clients hold copies (snapshots) of them in their carts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Primary key, unique and positive.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    /// Non-negative unit price.
    pub price: Price,
    /// Cover glyph shown in place of artwork.
    pub emoji: String,
    pub description: String,
}

impl Book {
    /// Create a book record.
    #[must_use]
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        price: Price,
        emoji: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre,
            price,
            emoji: emoji.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let book = Book::new(
            BookId::new(1),
            "Dune",
            "Frank Herbert",
            Genre::ScienceFiction,
            Price::from_cents(1899),
            "🏜️",
            "Spice and sandworms.",
        );

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Dune",
                "author": "Frank Herbert",
                "genre": "Science Fiction",
                "price": 18.99,
                "emoji": "🏜️",
                "description": "Spice and sandworms."
            })
        );

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
