//! Product Catalog Domain Models
//!
//! This module contains the two records served by the remote catalog:
//! the summary shown in the product list and the full detail record.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a product in the remote catalog
pub type ProductId = i64;

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A product as it appears in the product list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Unique identifier of the product
    pub id: ProductId,

    /// Product name
    pub title: String,

    /// Short description shown under the title
    pub summary: String,

    /// URL of the list thumbnail
    pub image_url: String,
}

/// Full product record shown on the detail screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Unique identifier of the product
    pub id: ProductId,

    /// Product name
    pub title: String,

    /// Short description
    pub summary: String,

    /// Long-form description
    pub description: String,

    /// Free-text price with currency and unit embedded (e.g. "$0.59/lb")
    pub price: String,

    /// URL of the full-size image
    pub image_url: String,
}

impl ProductDetail {
    /// Projects the detail record onto the fields used by the list screen.
    pub fn to_summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            title: self.title.clone(),
            summary: self.summary.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
