//! Stub catalog route handlers
//!
//! Serves the catalog's read-only JSON endpoints and a product image
//! origin that, like the real one, rejects requests without browser
//! headers.

use super::fixtures::PIXEL_PNG;
use super::state::SharedStore;
use crate::catalog::ProductId;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

/// Creates routes for the catalog endpoints
pub fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/products.json", get(list_products))
        .route("/product-details/:file", get(product_detail))
        .route("/images/:name", get(product_image))
}

/// Endpoint: GET /products.json
async fn list_products(State(store): State<SharedStore>) -> Response {
    if store.take_outage() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    Json(store.products()).into_response()
}

/// Endpoint: GET /product-details/{id}.json
async fn product_detail(State(store): State<SharedStore>, Path(file): Path<String>) -> Response {
    if store.take_outage() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let Some(id) = parse_detail_file(&file) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match store.detail(id) {
        Some(detail) => Json(detail).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Endpoint: GET /images/{name}
/// Answers 403 unless the request looks like it came from a browser.
async fn product_image(headers: HeaderMap) -> Response {
    let browser_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with("Mozilla/"));

    if !browser_agent || !headers.contains_key(header::REFERER) {
        return StatusCode::FORBIDDEN.into_response();
    }

    ([(header::CONTENT_TYPE, "image/png")], PIXEL_PNG).into_response()
}

/// Extracts the product id from a `{id}.json` path segment.
pub fn parse_detail_file(file: &str) -> Option<ProductId> {
    file.strip_suffix(".json")?.parse().ok()
}
