//! Test-only mocked network handlers.
//!
//! Automated UI tests run against this router instead of a live backend.
//! It is never mounted into the runtime API router.

use axum::{body::Bytes, extract::Path, routing::post, Json, Router};

/// Build the mock router.
///
/// Intercepts `POST /carts/{cart_id}` and answers a fixed canned payload,
/// ignoring the cart id and the request body entirely.
pub fn mock_handlers() -> Router {
    Router::new().route("/carts/{cart_id}", post(cart_handler))
}

// Bytes, not String: the body is discarded either way, but a String
// extractor would reject non-UTF-8 payloads before the handler runs.
async fn cart_handler(Path(_cart_id): Path<String>, _body: Bytes) -> Json<Vec<&'static str>> {
    Json(vec!["Laptop", "Phone"])
}
