//! In-memory catalog source
//!
//! A scripted `CatalogApi` that stands in for the remote backend in
//! tests and offline demos. Each call takes the next queued reply at the
//! moment it is issued; once the queue is empty the api answers from its
//! stored catalog.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::StatusCode;

use super::api::{ApiResponse, CatalogApi};
use super::error::Result;
use super::models::{ProductDetail, ProductId, ProductSummary};

/// One scripted answer from the fake backend
#[derive(Debug, Clone)]
pub enum Reply<T> {
    /// 200 with a decoded body
    Body(T),
    /// 200 with a JSON `null` body
    Null,
    /// Any status without a body
    Status(StatusCode),
    /// A body that fails to decode
    Malformed,
}

#[derive(Default)]
pub struct InMemoryCatalogApi {
    products: Mutex<Vec<ProductSummary>>,
    details: Mutex<HashMap<ProductId, ProductDetail>>,
    product_replies: Mutex<VecDeque<Reply<Vec<ProductSummary>>>>,
    detail_replies: Mutex<VecDeque<Reply<ProductDetail>>>,
    latencies: Mutex<VecDeque<Duration>>,
    calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `details` and derives the product listing from them, in order.
    pub fn with_catalog(self, details: impl IntoIterator<Item = ProductDetail>) -> Self {
        {
            let mut products = lock(&self.products);
            let mut stored = lock(&self.details);
            for detail in details {
                products.push(detail.to_summary());
                stored.insert(detail.id, detail);
            }
        }
        self
    }

    pub fn with_products(self, products: Vec<ProductSummary>) -> Self {
        *lock(&self.products) = products;
        self
    }

    pub fn push_products_reply(&self, reply: Reply<Vec<ProductSummary>>) {
        lock(&self.product_replies).push_back(reply);
    }

    pub fn push_detail_reply(&self, reply: Reply<ProductDetail>) {
        lock(&self.detail_replies).push_back(reply);
    }

    /// Delays the next unanswered call by `delay`; queued delays apply in call order.
    pub fn push_latency(&self, delay: Duration) {
        lock(&self.latencies).push_back(delay);
    }

    /// Number of requests served so far, across both endpoints
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = lock(&self.latencies).pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl<T> Reply<T> {
    fn into_response(self) -> Result<ApiResponse<T>> {
        match self {
            Reply::Body(body) => Ok(ApiResponse::ok(body)),
            Reply::Null => Ok(ApiResponse::status(StatusCode::OK)),
            Reply::Status(status) => Ok(ApiResponse::status(status)),
            Reply::Malformed => Err(<serde_json::Error as serde::de::Error>::custom(
                "expected value at line 1 column 7",
            )
            .into()),
        }
    }
}

impl CatalogApi for InMemoryCatalogApi {
    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductSummary>>> {
        let scripted = lock(&self.product_replies).pop_front();
        self.simulate_latency().await;
        match scripted {
            Some(reply) => reply.into_response(),
            None => Ok(ApiResponse::ok(lock(&self.products).clone())),
        }
    }

    async fn get_product_detail(&self, id: ProductId) -> Result<ApiResponse<ProductDetail>> {
        let scripted = lock(&self.detail_replies).pop_front();
        self.simulate_latency().await;
        if let Some(reply) = scripted {
            return reply.into_response();
        }
        match lock(&self.details).get(&id) {
            Some(detail) => Ok(ApiResponse::ok(detail.clone())),
            None => Ok(ApiResponse::status(StatusCode::NOT_FOUND)),
        }
    }
}
