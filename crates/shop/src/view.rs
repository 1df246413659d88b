//! Catalog listing for display.

use bookverse_core::{Book, BookFilter};

use crate::client::CatalogSource;

/// Message shown in place of the listing when the catalog cannot be fetched.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading books. Please try again later.";

/// What the book grid shows after a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Books to show, in catalog order.
    Loaded(Vec<Book>),
    /// The fetch failed; show [`LOAD_ERROR_MESSAGE`].
    Unavailable,
}

impl CatalogView {
    /// Books to show; empty when unavailable.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        match self {
            Self::Loaded(books) => books,
            Self::Unavailable => &[],
        }
    }

    /// Keep only the books `filter` lets through.
    #[must_use]
    pub fn filtered(self, filter: &BookFilter) -> Self {
        match self {
            Self::Loaded(books) => {
                Self::Loaded(books.into_iter().filter(|b| filter.matches(b)).collect())
            }
            Self::Unavailable => Self::Unavailable,
        }
    }
}

/// Fetch the listing. Failures are logged and turned into
/// [`CatalogView::Unavailable`]; there is no retry.
pub async fn load_catalog<S: CatalogSource>(source: &S) -> CatalogView {
    match source.list_books().await {
        Ok(books) => CatalogView::Loaded(books),
        Err(e) => {
            tracing::error!("Error fetching books: {e}");
            CatalogView::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::controller::tests::FakeCatalog;

    #[tokio::test]
    async fn test_loaded() {
        let view = load_catalog(&FakeCatalog::two_books()).await;
        assert_eq!(view.books().len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_does_not_retry() {
        let source = FakeCatalog::two_books();
        source.offline.store(true, Ordering::SeqCst);

        let view = load_catalog(&source).await;
        assert_eq!(view, CatalogView::Unavailable);
        assert!(view.books().is_empty());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_filtered_keeps_order() {
        let view = load_catalog(&FakeCatalog::two_books())
            .await
            .filtered(&BookFilter::search("technology"));
        let ids: Vec<i32> = view.books().iter().map(|b| b.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
