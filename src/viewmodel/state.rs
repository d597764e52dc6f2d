//! View-state snapshots
//!
//! Snapshots are immutable values; controllers replace them wholesale.
//! The load phase is a tagged union, so a payload and an error can never
//! be set at the same time.

use crate::catalog::{ProductDetail, ProductSummary};
use crate::location::UNKNOWN_CITY;

/// Phase of a screen's data load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// A request is in flight; any previous payload has been discarded
    #[default]
    Loading,
    Loaded(T),
    /// The last request failed with a human-readable message
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for LoadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }
}

/// What the product list screen renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewState {
    pub load: LoadState<Vec<ProductSummary>>,
}

impl ListViewState {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    /// `None` until a load succeeds; `Some(&[])` for an empty catalog
    pub fn products(&self) -> Option<&[ProductSummary]> {
        self.load.value().map(Vec::as_slice)
    }

    pub fn error(&self) -> Option<&str> {
        self.load.error()
    }
}

/// What the product detail screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewState {
    pub load: LoadState<ProductDetail>,
    /// Filled independently of the load outcome; only feeds the share text
    pub city_name: String,
}

impl Default for DetailViewState {
    fn default() -> Self {
        Self {
            load: LoadState::Loading,
            city_name: UNKNOWN_CITY.to_string(),
        }
    }
}

impl DetailViewState {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn product_detail(&self) -> Option<&ProductDetail> {
        self.load.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.load.error()
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }
}
