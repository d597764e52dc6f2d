//! Routing module for the stub catalog backend

use crate::stub::SharedStore;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Creates and configures the stub backend router with all routes and middleware
pub fn create_app_router(store: SharedStore) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let res = next.run(req).await;
        if res.status().is_success() {
            info!("{} {} -> {}", method, uri, res.status());
        } else {
            warn!("{} {} -> {}", method, uri, res.status());
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::stub::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(store)
}

/// Serves the stub backend on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, store: SharedStore) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("stub catalog listening on http://{}", addr);
    }
    axum::serve(listener, create_app_router(store)).await
}
