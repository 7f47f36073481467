//! Cars service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, limits, metrics)
//!                         │
//!                         ▼
//!                     http::handlers ──▶ security (user header → role)
//!                         │          ──▶ domain::validation
//!                         │          ──▶ http::etag
//!                         ▼
//!                     store::CarStore (MemoryStore, seeded from fixtures)
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use cars_service::config::{load_config, ServiceConfig};
use cars_service::observability::{logging, metrics};
use cars_service::store::{load_dataset, CarStore, MemoryStore};
use cars_service::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cars-service")]
#[command(about = "HTTP service managing car records", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset to seed, overriding `fixtures.dataset`.
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(dataset) = args.dataset {
        config.fixtures.dataset = Some(dataset);
    }

    logging::init(&config.observability);
    tracing::info!("cars-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?args.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &config.fixtures.dataset {
        let dataset = load_dataset(path)?;
        store.seed(dataset.cars)?;
        tracing::info!(cars = store.count(), "Store seeded");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
