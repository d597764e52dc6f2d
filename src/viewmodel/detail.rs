//! Product detail controller
//!
//! Owns the detail screen's [`DetailViewState`]. Nothing is fetched until
//! the screen asks for a product. The detail request and the city lookup
//! run concurrently and are published together.

use std::sync::Arc;

use futures_util::future::join;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::publisher::StatePublisher;
use super::state::{DetailViewState, LoadState};
use crate::catalog::{CatalogApi, ProductId, ProductRepository};
use crate::location::{resolve_city_name, LocationProvider};
use crate::share;

/// Publishes [`DetailViewState`] snapshots for one product screen.
///
/// Loads are spawned onto the current Tokio runtime. Dropping the controller
/// has the same effect as [`dispose`](Self::dispose).
pub struct ProductDetailController<A: CatalogApi> {
    repository: Arc<ProductRepository<A>>,
    publisher: Arc<StatePublisher<DetailViewState>>,
}

impl<A: CatalogApi> ProductDetailController<A> {
    pub fn new(repository: Arc<ProductRepository<A>>) -> Self {
        Self {
            repository,
            publisher: Arc::new(StatePublisher::new(DetailViewState::loading())),
        }
    }

    /// Loads product `id` and resolves the city name through `location`.
    ///
    /// The city name is attached whether or not the product request
    /// succeeds. Must be called from within a Tokio runtime.
    pub fn load_product_detail<L: LocationProvider>(
        &self,
        id: ProductId,
        location: Arc<L>,
    ) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        self.publisher.launch(
            |current| DetailViewState {
                load: LoadState::Loading,
                city_name: current.city_name.clone(),
            },
            async move {
                let (detail, city_name) = join(
                    repository.fetch_product_detail(id),
                    resolve_city_name(location.as_ref()),
                )
                .await;

                DetailViewState {
                    load: detail.into(),
                    city_name,
                }
            },
        )
    }

    /// Re-runs [`load_product_detail`](Self::load_product_detail) for the same product.
    pub fn retry<L: LocationProvider>(&self, id: ProductId, location: Arc<L>) -> JoinHandle<()> {
        self.load_product_detail(id, location)
    }

    /// The share message for the current snapshot; empty until a product is loaded.
    pub fn shareable_text(&self) -> String {
        share::shareable_text(&self.state())
    }

    pub fn state(&self) -> DetailViewState {
        self.publisher.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailViewState> {
        self.publisher.subscribe()
    }

    pub fn dispose(&self) {
        self.publisher.dispose();
    }
}

impl<A: CatalogApi> Drop for ProductDetailController<A> {
    fn drop(&mut self) {
        self.publisher.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::{InMemoryCatalogApi, Reply};
    use crate::location::{Address, Coordinates, LocationError, StaticLocation};
    use crate::stub::fixtures::sample_catalog;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tokio::time::Instant;

    fn controller() -> ProductDetailController<InMemoryCatalogApi> {
        let api = InMemoryCatalogApi::new().with_catalog(sample_catalog());
        ProductDetailController::new(Arc::new(ProductRepository::new(api)))
    }

    fn grand_rapids() -> Arc<StaticLocation> {
        Arc::new(StaticLocation::at(
            Coordinates {
                latitude: 42.96,
                longitude: -85.67,
            },
            Some("Grand Rapids".into()),
        ))
    }

    /// Location collaborator that takes a while to answer
    struct SlowLocation {
        delay: Duration,
    }

    impl LocationProvider for SlowLocation {
        fn has_permission(&self) -> bool {
            true
        }

        async fn last_known_location(&self) -> Result<Option<Coordinates>, LocationError> {
            tokio::time::sleep(self.delay).await;
            Ok(Some(Coordinates::default()))
        }

        async fn reverse_geocode(&self, _: Coordinates) -> Result<Vec<Address>, LocationError> {
            Ok(vec![Address {
                locality: Some("Lansing".into()),
            }])
        }
    }

    /// Location collaborator whose platform service is gone
    struct Unavailable;

    impl LocationProvider for Unavailable {
        fn has_permission(&self) -> bool {
            true
        }

        async fn last_known_location(&self) -> Result<Option<Coordinates>, LocationError> {
            Err(LocationError::Unavailable("play services missing".into()))
        }

        async fn reverse_geocode(&self, _: Coordinates) -> Result<Vec<Address>, LocationError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_loading_with_unknown_city() {
        let controller = controller();

        let state = controller.state();
        assert!(state.is_loading());
        assert!(state.product_detail().is_none());
        assert_eq!(state.city_name(), "Unknown");
        assert_eq!(controller.shareable_text(), "");
    }

    #[tokio::test]
    async fn test_load_success_publishes_detail_and_city() {
        let controller = controller();

        controller.load_product_detail(0, grand_rapids()).await.unwrap();

        let state = controller.state();
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.product_detail().unwrap().title, "Bananas");
        assert_eq!(state.city_name(), "Grand Rapids");
        assert_eq!(
            controller.shareable_text(),
            "Bananas - $0.59/lb from Grand Rapids added to list"
        );
    }

    #[tokio::test]
    async fn test_failure_still_attaches_city() {
        let controller = controller();

        controller.load_product_detail(42, grand_rapids()).await.unwrap();

        let state = controller.state();
        assert!(state.product_detail().is_none());
        assert_eq!(state.error(), Some("Failed to fetch product detail: 404"));
        assert_eq!(state.city_name(), "Grand Rapids");
        assert_eq!(controller.shareable_text(), "");
    }

    #[tokio::test]
    async fn test_location_failure_never_blocks_detail() {
        let controller = controller();

        controller
            .load_product_detail(1, Arc::new(Unavailable))
            .await
            .unwrap();

        let state = controller.state();
        assert_eq!(state.product_detail().unwrap().title, "Apples");
        assert_eq!(state.city_name(), "Unknown");
    }

    #[tokio::test]
    async fn test_denied_permission_shares_unknown_city() {
        let controller = controller();

        controller
            .load_product_detail(0, Arc::new(StaticLocation::denied()))
            .await
            .unwrap();

        assert_eq!(
            controller.shareable_text(),
            "Bananas - $0.59/lb from Unknown added to list"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_and_city_lookups_overlap() {
        let api = InMemoryCatalogApi::new().with_catalog(sample_catalog());
        api.push_latency(Duration::from_millis(300));
        let controller = ProductDetailController::new(Arc::new(ProductRepository::new(api)));
        let location = Arc::new(SlowLocation {
            delay: Duration::from_millis(300),
        });

        let started = Instant::now();
        controller.load_product_detail(2, location).await.unwrap();

        assert!(started.elapsed() < Duration::from_millis(600));
        assert_eq!(controller.state().city_name(), "Lansing");
    }

    #[tokio::test]
    async fn test_retry_after_failure_recovers() {
        let controller = controller();
        controller
            .repository
            .api()
            .push_detail_reply(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR));

        controller.load_product_detail(1, grand_rapids()).await.unwrap();
        assert_eq!(
            controller.state().error(),
            Some("Failed to fetch product detail: 500")
        );

        controller.retry(1, grand_rapids()).await.unwrap();

        let state = controller.state();
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.product_detail().unwrap().title, "Apples");
    }

    #[tokio::test]
    async fn test_reload_keeps_city_but_clears_detail_while_loading() {
        let controller = controller();
        controller.load_product_detail(0, grand_rapids()).await.unwrap();

        controller
            .repository
            .api()
            .push_latency(Duration::from_millis(200));
        let handle = controller.load_product_detail(1, grand_rapids());

        let state = controller.state();
        assert!(state.is_loading());
        assert!(state.product_detail().is_none());
        assert!(state.error().is_none());
        assert_eq!(state.city_name(), "Grand Rapids");

        handle.await.unwrap();
        assert_eq!(controller.state().product_detail().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_load_after_dispose_is_ignored() {
        let controller = controller();
        controller.dispose();

        controller.load_product_detail(0, grand_rapids()).await.unwrap();

        assert!(controller.state().is_loading());
        assert_eq!(controller.repository.api().call_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_abandons_in_flight_load() {
        let controller = controller();
        controller
            .repository
            .api()
            .push_latency(Duration::from_millis(100));
        let rx = controller.subscribe();
        let _handle = controller.load_product_detail(0, grand_rapids());

        drop(controller);
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = rx.borrow();
        assert!(state.is_loading());
        assert!(state.product_detail().is_none());
        assert_eq!(state.city_name(), "Unknown");
    }
}
