//! Log setup for the binary

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "product_catalog=info";

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `product_catalog=info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
