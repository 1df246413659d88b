//! The per-session cart controller.
//!
//! A [`CartController`] owns one [`Cart`] and the catalog source it resolves
//! book IDs against. Every mutation takes `&mut self`, so a session's actions
//! run one at a time, each finishing its catalog round trip before the next
//! starts.

use bookverse_core::{
    Book, BookFilter, BookId, Cart, CartError, CartView, CheckoutOutcome, Notification, Price,
};
use thiserror::Error;
use tracing::instrument;

use crate::client::{CatalogSource, ClientError};
use crate::view::{CatalogView, load_catalog};

/// Errors from controller actions.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The cart rejected the action.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The catalog could not be fetched.
    #[error("catalog unavailable: {0}")]
    Catalog(#[from] ClientError),
}

impl ControllerError {
    /// Whether a front end should drop the action without telling the user:
    /// an unknown book ID or a failed catalog fetch while adding.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::Cart(CartError::BookNotFound(_)) | Self::Catalog(_)
        )
    }
}

/// Shopping cart bound to one session.
#[derive(Debug)]
pub struct CartController<S> {
    source: S,
    cart: Cart,
}

impl<S: CatalogSource> CartController<S> {
    /// Start a session with an empty cart.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            cart: Cart::new(),
        }
    }

    /// Resolve `book_id` against the current listing and append it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::BookNotFound`] if the listing has no such book
    /// and [`ControllerError::Catalog`] if the listing cannot be fetched. In
    /// both cases the cart is unchanged.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, book_id: BookId) -> Result<Notification, ControllerError> {
        let books = self.source.list_books().await.inspect_err(|e| {
            tracing::error!("Error adding to cart: {e}");
        })?;

        let book = books
            .into_iter()
            .find(|book| book.id == book_id)
            .ok_or_else(|| {
                tracing::debug!(%book_id, "Book not in catalog, dropping add");
                CartError::BookNotFound(book_id)
            })?;

        Ok(self.cart.add(book))
    }

    /// Remove the entry at `index` (zero-based, as rendered).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no such entry.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, index: usize) -> Result<Book, CartError> {
        self.cart.remove(index)
    }

    /// Sum of prices currently in the cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Number of entries, for the cart badge.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    /// Place the order. An empty cart is reported and left alone; otherwise
    /// the cart is cleared and the charged total reported.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> CheckoutOutcome {
        let outcome = self.cart.checkout();
        match &outcome {
            CheckoutOutcome::EmptyCart => tracing::debug!("Checkout attempted on empty cart"),
            CheckoutOutcome::Placed { total, item_count } => {
                tracing::info!(%total, item_count, "Order placed");
            }
        }
        outcome
    }

    /// Rebuild the cart display from the current entries.
    #[must_use]
    pub fn render_cart(&self) -> CartView {
        self.cart.render()
    }

    /// Read-only access to the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Fetch the catalog for display, keeping only books `filter` lets through.
    pub async fn browse(&self, filter: &BookFilter) -> CatalogView {
        load_catalog(&self.source).await.filtered(filter)
    }

    /// The catalog source backing this session.
    pub const fn source(&self) -> &S {
        &self.source
    }
}
