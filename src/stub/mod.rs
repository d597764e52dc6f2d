//! Stub Catalog Backend Module
//!
//! An in-process stand-in for the remote catalog, including:
//! - Seed data (fixtures)
//! - The in-memory store with an outage switch
//! - Route handlers for the catalog and image endpoints

pub mod fixtures;
pub mod handlers;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{CatalogStore, SharedStore};
