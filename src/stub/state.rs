//! Stub Catalog State Management
//!
//! In-memory catalog served by the stub backend, plus an outage switch
//! used to exercise retry paths.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::fixtures::sample_catalog;
use crate::catalog::{ProductDetail, ProductId, ProductSummary};

/// Shared store that can be safely passed between handlers
pub type SharedStore = Arc<CatalogStore>;

pub struct CatalogStore {
    /// Product listing in response order
    listing: Vec<ProductSummary>,

    /// Detail records keyed by product id.
    /// DashMap allows concurrent access without external Mutexes.
    details: DashMap<ProductId, ProductDetail>,

    /// Number of upcoming requests that will be answered with 503
    outage: AtomicU32,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(sample_catalog())
    }
}

impl CatalogStore {
    /// Builds a store whose listing follows the order of `details`.
    pub fn new(details: impl IntoIterator<Item = ProductDetail>) -> Self {
        let mut listing = Vec::new();
        let map = DashMap::new();
        for detail in details {
            listing.push(detail.to_summary());
            map.insert(detail.id, detail);
        }

        Self {
            listing,
            details: map,
            outage: AtomicU32::new(0),
        }
    }

    pub fn products(&self) -> Vec<ProductSummary> {
        self.listing.clone()
    }

    pub fn detail(&self, id: ProductId) -> Option<ProductDetail> {
        self.details.get(&id).map(|entry| entry.value().clone())
    }

    /// Makes the next `count` requests fail with 503.
    pub fn fail_next(&self, count: u32) {
        self.outage.store(count, Ordering::SeqCst);
    }

    /// Consumes one pending failure, if any.
    pub fn take_outage(&self) -> bool {
        self.outage
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}
