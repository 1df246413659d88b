//! Per-session shopping cart.
//!
//! A [`Cart`] is an ordered list of book snapshots. Insertion order is display
//! order and the same book may appear more than once. The cart is owned by a
//! single session and is never shared, so mutations take `&mut self` and need
//! no synchronization.
//!
//! # State Machine
//!
//! ```text
//! Empty --add--> Filled --add/remove--> Filled
//! Filled --remove last--> Empty
//! Filled --checkout--> Empty          (reports total)
//! Empty --checkout--> Empty           (reports warning)
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::book::Book;
use crate::notification::Notification;
use crate::types::{BookId, Price};

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Remove was asked for a position past the end of the cart.
    #[error("cart index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Add was asked for a book the catalog does not list.
    #[error("book {0} is not in the catalog")]
    BookNotFound(BookId),
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    /// Position in the cart, as accepted by [`Cart::remove`].
    pub index: usize,
    pub book_id: BookId,
    pub title: String,
    pub price: Price,
}

/// Cart display data, rebuilt from the cart on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    pub item_count: usize,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::ZERO,
            item_count: 0,
        }
    }

    /// The `(title, price)` pairs in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<(&str, Price)> {
        self.items
            .iter()
            .map(|item| (item.title.as_str(), item.price))
            .collect()
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to buy; the cart was left untouched.
    EmptyCart,
    /// The order went through and the cart was cleared.
    Placed { total: Price, item_count: usize },
}

impl CheckoutOutcome {
    /// The notification to show for this outcome.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::EmptyCart => Notification::warning("Your cart is empty!"),
            Self::Placed { total, .. } => Notification::success(format!(
                "Order placed! Total: {total}. Thank you for shopping with BookVerse! 🎉"
            )),
        }
    }

    /// The charged total, if an order was placed.
    #[must_use]
    pub const fn total(&self) -> Option<Price> {
        match self {
            Self::EmptyCart => None,
            Self::Placed { total, .. } => Some(*total),
        }
    }
}

/// An ordered, session-local list of book snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<Book>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a book snapshot and return the confirmation to show.
    pub fn add(&mut self, book: Book) -> Notification {
        let notification = Notification::success(format!("\"{}\" added to cart!", book.title));
        self.entries.push(book);
        notification
    }

    /// Remove the entry at `index`, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index >= len()`; the cart
    /// is left unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Book, CartError> {
        if index >= self.entries.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Sum of entry prices; `0.00` when empty.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(|book| book.price).sum()
    }

    /// Number of entries (the cart badge count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[Book] {
        &self.entries
    }

    /// Build a fresh display view of the current contents.
    #[must_use]
    pub fn render(&self) -> CartView {
        CartView {
            items: self
                .entries
                .iter()
                .enumerate()
                .map(|(index, book)| CartItemView {
                    index,
                    book_id: book.id,
                    title: book.title.clone(),
                    price: book.price,
                })
                .collect(),
            subtotal: self.total(),
            item_count: self.entries.len(),
        }
    }

    /// Place the order: report the total and clear the cart.
    ///
    /// An empty cart is left as is and reported as [`CheckoutOutcome::EmptyCart`].
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.entries.is_empty() {
            return CheckoutOutcome::EmptyCart;
        }

        let entries = std::mem::take(&mut self.entries);
        CheckoutOutcome::Placed {
            total: entries.iter().map(|book| book.price).sum(),
            item_count: entries.len(),
        }
    }
}
