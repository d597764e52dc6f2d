//! Product Catalog Domain Module
//!
//! This module contains everything needed to read the remote catalog:
//! - Domain models (ProductSummary, ProductDetail)
//! - The remote data source (CatalogApi, HttpCatalogApi)
//! - An in-memory data source for tests and the offline CLI mode
//! - The repository that normalizes results into `CatalogError`

pub mod api;
pub mod error;
pub mod fake;
pub mod models;
pub mod repository;

// Re-export commonly used types for convenience
pub use api::{ApiResponse, CatalogApi, HttpCatalogApi};
pub use error::CatalogError;
pub use models::{ProductDetail, ProductId, ProductSummary};
pub use repository::ProductRepository;
