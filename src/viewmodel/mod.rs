//! View-State Module
//!
//! This module contains the screen controllers and the snapshots they publish:
//! - Snapshot types (LoadState, ListViewState, DetailViewState)
//! - The product list controller
//! - The product detail controller
//! - The shared publisher that sequences loads and handles disposal

pub mod detail;
pub mod list;
mod publisher;
pub mod state;

// Re-export commonly used types for convenience
pub use detail::ProductDetailController;
pub use list::ProductListController;
pub use state::{DetailViewState, ListViewState, LoadState};
