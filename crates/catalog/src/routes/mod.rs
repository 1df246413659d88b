//! HTTP route handlers for the catalog service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Deployment summary (blue-green demo)
//! GET  /health                 - Health check
//! GET  /version                - Version, color, hostname, build number
//!
//! # Catalog API
//! GET  /api                    - Service metadata and catalog stats
//! GET  /api/books              - All books
//! GET  /api/books/{id}         - Single book (404 if absent)
//!
//! # Assets
//! GET  /static/*               - Files from CATALOG_STATIC_DIR, when set
//! ```

pub mod books;
pub mod meta;

use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the book API routes router.
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(books::index))
        .route("/{id}", get(books::show))
}

/// Create all routes for the catalog service.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Deployment metadata
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .route("/version", get(meta::version))
        // Catalog API
        .route("/api", get(meta::api_info))
        .nest("/api/books", book_routes())
}

/// Build the full application: routes, static assets, tracing and request IDs.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let mut router = routes();

    if let Some(dir) = state.config().static_dir.as_ref() {
        tracing::info!(dir = %dir.display(), "Serving static assets");
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}
