//! Remote catalog data source
//!
//! Two read-only JSON endpoints relative to the configured base URL:
//! `products.json` and `product-details/{id}.json`.

use std::future::Future;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{CatalogError, Result};
use super::models::{ProductDetail, ProductId, ProductSummary};
use crate::config::ClientConfig;

/// Raw outcome of a catalog request that reached the server.
///
/// `body` is `None` for non-success statuses and for success responses
/// whose body is empty or JSON `null` (what the backend returns for
/// unknown keys).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

/// Read access to the remote catalog.
///
/// `Err` is reserved for transport and decode failures; HTTP error
/// statuses come back as an `ApiResponse`.
pub trait CatalogApi: Send + Sync + 'static {
    fn get_products(&self) -> impl Future<Output = Result<ApiResponse<Vec<ProductSummary>>>> + Send;

    fn get_product_detail(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ApiResponse<ProductDetail>>> + Send;
}

/// `CatalogApi` over HTTP, backed by a single explicitly constructed client
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Ok(ApiResponse::status(status));
        }

        let bytes = response.bytes().await?;
        Ok(ApiResponse {
            status,
            body: decode_body(&bytes)?,
        })
    }
}

impl CatalogApi for HttpCatalogApi {
    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductSummary>>> {
        self.get_json("products.json").await
    }

    async fn get_product_detail(&self, id: ProductId) -> Result<ApiResponse<ProductDetail>> {
        self.get_json(&format!("product-details/{}.json", id)).await
    }
}

/// Decodes a success body; an empty body or JSON `null` means "absent".
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(bytes)?)
}
