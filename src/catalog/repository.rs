//! Product repository
//!
//! The only caller of the catalog data source. Every request is a single
//! round trip; retrying is left to the controllers.

use tracing::warn;

use super::api::{ApiResponse, CatalogApi};
use super::error::{CatalogError, Result};
use super::models::{ProductDetail, ProductId, ProductSummary};

const PRODUCTS_CONTEXT: &str = "Failed to fetch products";
const DETAIL_CONTEXT: &str = "Failed to fetch product detail";

pub struct ProductRepository<A> {
    api: A,
}

impl<A: CatalogApi> ProductRepository<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the product list in response order. An empty list is a success.
    pub async fn fetch_products(&self) -> Result<Vec<ProductSummary>> {
        let result = self
            .api
            .get_products()
            .await
            .and_then(|response| require_body(response, PRODUCTS_CONTEXT));

        if let Err(e) = &result {
            warn!("product list request failed: {}", e);
        }
        result
    }

    /// Fetches one product. `id` is passed through untouched; unknown ids
    /// are reported by the backend.
    pub async fn fetch_product_detail(&self, id: ProductId) -> Result<ProductDetail> {
        let result = self
            .api
            .get_product_detail(id)
            .await
            .and_then(|response| require_body(response, DETAIL_CONTEXT));

        if let Err(e) = &result {
            warn!("product detail request for {} failed: {}", id, e);
        }
        result
    }
}

/// Success needs both a 2xx status and a body.
fn require_body<T>(response: ApiResponse<T>, context: &'static str) -> Result<T> {
    match response {
        ApiResponse {
            status,
            body: Some(body),
        } if status.is_success() => Ok(body),
        ApiResponse { status, .. } => Err(CatalogError::Status { context, status }),
    }
}
