//! Product Catalog Library
//!
//! This library loads a remote product catalog and publishes screen state
//! for a product list and a product detail view, with a best-effort city
//! lookup feeding the share message.

// Domain modules
pub mod catalog;
pub mod location;
pub mod viewmodel;

// Presentation
pub mod image;
pub mod render;
pub mod share;

// Infrastructure
pub mod config;
pub mod logging;
pub mod router;
pub mod stub;
