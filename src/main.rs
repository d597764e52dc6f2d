use clap::{Parser, Subcommand};
use product_catalog::catalog::fake::InMemoryCatalogApi;
use product_catalog::catalog::{CatalogApi, HttpCatalogApi, ProductId, ProductRepository};
use product_catalog::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use product_catalog::location::{Coordinates, StaticLocation};
use product_catalog::render::{render_detail, render_list};
use product_catalog::stub::fixtures::sample_catalog;
use product_catalog::stub::CatalogStore;
use product_catalog::viewmodel::{ProductDetailController, ProductListController};
use product_catalog::{logging, router};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "product_catalog", version, about = "Browse a remote product catalog")]
struct Cli {
    /// Catalog root URL
    #[arg(long, global = true, env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CATALOG_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Browse the bundled sample catalog instead of the remote backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the stub catalog backend
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    /// Load and print the product list
    List {
        /// Extra attempts after a failed load
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Load and print one product with its share message
    Show {
        id: ProductId,

        /// City reported by the location lookup; omitted means permission denied
        #[arg(long)]
        city: Option<String>,

        /// Extra attempts after a failed load
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();
    let offline = cli.offline;

    let config = ClientConfig::from_env()
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    let success = match cli.command {
        Command::Serve { addr } => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            router::serve(listener, Arc::new(CatalogStore::default())).await?;
            true
        }
        Command::List { retries } if offline => run_list(offline_repository(), retries).await?,
        Command::List { retries } => run_list(http_repository(&config)?, retries).await?,
        Command::Show { id, city, retries } if offline => {
            run_show(offline_repository(), id, city, retries).await?
        }
        Command::Show { id, city, retries } => {
            run_show(http_repository(&config)?, id, city, retries).await?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn http_repository(config: &ClientConfig) -> anyhow::Result<Arc<ProductRepository<HttpCatalogApi>>> {
    Ok(Arc::new(ProductRepository::new(HttpCatalogApi::new(config)?)))
}

fn offline_repository() -> Arc<ProductRepository<InMemoryCatalogApi>> {
    info!("using the bundled sample catalog");
    let api = InMemoryCatalogApi::new().with_catalog(sample_catalog());
    Arc::new(ProductRepository::new(api))
}

/// Prints the list once it settles; `Ok(false)` when every attempt failed.
async fn run_list<A: CatalogApi>(
    repository: Arc<ProductRepository<A>>,
    retries: u32,
) -> anyhow::Result<bool> {
    let controller = ProductListController::new(repository);
    let mut rx = controller.subscribe();

    let mut attempt = 0;
    loop {
        let state = rx.wait_for(|s| !s.is_loading()).await?.clone();
        println!("{}", render_list(&state));

        if state.error().is_none() {
            return Ok(true);
        }
        if attempt >= retries {
            return Ok(false);
        }
        attempt += 1;
        info!("retrying product list ({}/{})", attempt, retries);
        controller.retry().await?;
    }
}

async fn run_show<A: CatalogApi>(
    repository: Arc<ProductRepository<A>>,
    id: ProductId,
    city: Option<String>,
    retries: u32,
) -> anyhow::Result<bool> {
    let controller = ProductDetailController::new(repository);
    let location = Arc::new(match city {
        Some(city) => StaticLocation::at(Coordinates::default(), Some(city)),
        None => StaticLocation::denied(),
    });

    controller
        .load_product_detail(id, Arc::clone(&location))
        .await?;

    let mut attempt = 0;
    loop {
        let state = controller.state();
        println!("{}", render_detail(&state));

        if state.error().is_none() {
            return Ok(true);
        }
        if attempt >= retries {
            return Ok(false);
        }
        attempt += 1;
        info!("retrying product {} ({}/{})", id, attempt, retries);
        controller.retry(id, Arc::clone(&location)).await?;
    }
}
