//! Book route handlers.

use std::num::IntErrorKind;

use axum::{
    Json,
    extract::{Path, State},
};
use bookverse_core::{Book, BookId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every book in catalog order.
///
/// No pagination, filtering or sorting happens here; clients filter locally.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.catalog().list_books().to_vec())
}

/// Look up a single book by ID.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Book>> {
    // An integer outside the ID range names no book; anything else is malformed.
    let id = id.parse::<BookId>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            AppError::NotFound("Book not found".to_string())
        }
        _ => AppError::BadRequest("Invalid book id".to_string()),
    })?;

    let book = state.catalog().get_book(id).inspect_err(|_| {
        tracing::debug!(book_id = %id, "Book not found");
    })?;

    Ok(Json(book.clone()))
}
