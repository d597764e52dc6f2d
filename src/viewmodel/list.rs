//! Product list controller
//!
//! Owns the list screen's [`ListViewState`]. The first load starts as soon
//! as the controller is created.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::publisher::StatePublisher;
use super::state::ListViewState;
use crate::catalog::{CatalogApi, ProductRepository};

/// Publishes [`ListViewState`] snapshots for the product list.
///
/// Construction spawns the first load, so a controller can only be created
/// from within a Tokio runtime. Dropping it has the same effect as
/// [`dispose`](Self::dispose).
pub struct ProductListController<A: CatalogApi> {
    repository: Arc<ProductRepository<A>>,
    publisher: Arc<StatePublisher<ListViewState>>,
}

impl<A: CatalogApi> ProductListController<A> {
    /// Creates the controller and starts the initial load.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(repository: Arc<ProductRepository<A>>) -> Self {
        let controller = Self {
            repository,
            publisher: Arc::new(StatePublisher::new(ListViewState::loading())),
        };
        controller.load();
        controller
    }

    /// Discards the current payload, publishes a loading snapshot and fetches
    /// the list again. A newer load supersedes any load still in flight.
    pub fn load(&self) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        self.publisher
            .launch(|_| ListViewState::loading(), async move {
                ListViewState {
                    load: repository.fetch_products().await.into(),
                }
            })
    }

    /// User-requested reload; same effect as [`load`](Self::load).
    pub fn retry(&self) -> JoinHandle<()> {
        self.load()
    }

    pub fn state(&self) -> ListViewState {
        self.publisher.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListViewState> {
        self.publisher.subscribe()
    }

    pub fn dispose(&self) {
        self.publisher.dispose();
    }
}

impl<A: CatalogApi> Drop for ProductListController<A> {
    fn drop(&mut self) {
        self.publisher.dispose();
    }
}
